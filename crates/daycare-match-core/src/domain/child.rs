use crate::error::{MatchError, Result};
use crate::ids::{Age, ChildId, DaycareId, FamilyId, AGE_COUNT};
use crate::records::ChildRecord;

/// A child applying for a daycare seat.
#[derive(Debug, Clone, PartialEq)]
pub struct Child {
    pub id: ChildId,
    pub age: Age,
    /// Owning family; equals the child's own id for singleton families.
    pub family: FamilyId,
    /// Daycare the child is enrolled at today, or [`DaycareId::UNMATCHED`].
    pub initial_daycare: DaycareId,
    pub actual_daycare: DaycareId,
    /// Individual preferences with absent entries replaced by the sentinel.
    pub pref: Vec<DaycareId>,
}

impl Child {
    pub fn from_record(record: &ChildRecord) -> Result<Self> {
        if record.age >= AGE_COUNT {
            return Err(MatchError::InvalidInput(format!(
                "child {} has age {} outside 0..{}",
                record.id, record.age, AGE_COUNT
            )));
        }
        Ok(Self {
            id: record.id,
            age: record.age,
            family: record.family_id.unwrap_or_else(|| record.id.own_family()),
            initial_daycare: DaycareId::or_unmatched(record.initial_daycare_id),
            actual_daycare: DaycareId::or_unmatched(record.actual_daycare_id),
            pref: record
                .preference_list
                .iter()
                .map(|d| DaycareId::or_unmatched(*d))
                .collect(),
        })
    }

    /// Returns true if the child currently holds a seat somewhere.
    ///
    /// Families of such children must receive exactly one assignment.
    pub fn is_transfer(&self) -> bool {
        !self.initial_daycare.is_unmatched()
    }
}
