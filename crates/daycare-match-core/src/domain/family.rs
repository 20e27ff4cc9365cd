use smallvec::SmallVec;

use crate::error::{MatchError, Result};
use crate::ids::{ChildId, DaycareId, FamilyId};
use crate::records::{FamilyPreference, FamilyRecord};

/// One daycare per family child, aligned with [`Family::children`].
pub type PreferenceTuple = SmallVec<[DaycareId; 4]>;

/// A family applying jointly for its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Family {
    pub id: FamilyId,
    pub children: Vec<ChildId>,
    /// Preference positions, best first.
    pub pref: Vec<PreferenceTuple>,
}

impl Family {
    /// Builds a family, normalizing every position to a full tuple.
    pub fn from_record(record: &FamilyRecord) -> Result<Self> {
        let arity = record.children.len();
        let mut pref = Vec::with_capacity(record.pref.len());
        for (position, entry) in record.pref.iter().enumerate() {
            let tuple: PreferenceTuple = match entry {
                FamilyPreference::Single(id) if arity == 1 => {
                    SmallVec::from_elem(DaycareId::or_unmatched(*id), 1)
                }
                FamilyPreference::Single(_) => {
                    return Err(MatchError::InvalidInput(format!(
                        "family {} gives a single daycare at position {} for {} children",
                        record.id, position, arity
                    )));
                }
                FamilyPreference::Joint(ids) => {
                    ids.iter().map(|d| DaycareId::or_unmatched(*d)).collect()
                }
            };
            if tuple.len() != arity {
                return Err(MatchError::InvalidInput(format!(
                    "family {} position {} lists {} daycares for {} children",
                    record.id,
                    position,
                    tuple.len(),
                    arity
                )));
            }
            pref.push(tuple);
        }
        Ok(Self {
            id: record.id,
            children: record.children.clone(),
            pref,
        })
    }

    pub fn has_siblings(&self) -> bool {
        self.children.len() > 1
    }

    pub fn position_count(&self) -> usize {
        self.pref.len()
    }

    /// Distinct daycares named at `position`, in first-seen order.
    pub fn daycares_at(&self, position: usize) -> Vec<DaycareId> {
        let mut daycares = Vec::new();
        if let Some(tuple) = self.pref.get(position) {
            for &d in tuple {
                if !daycares.contains(&d) {
                    daycares.push(d);
                }
            }
        }
        daycares
    }

    /// Children applying to `daycare` at `position`, in family order.
    pub fn children_at(&self, position: usize, daycare: DaycareId) -> Vec<ChildId> {
        self.pref
            .get(position)
            .map(|tuple| {
                tuple
                    .iter()
                    .zip(&self.children)
                    .filter(|(d, _)| **d == daycare)
                    .map(|(_, c)| *c)
                    .collect()
            })
            .unwrap_or_default()
    }
}
