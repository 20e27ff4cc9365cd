use crate::error::{MatchError, Result};
use crate::ids::{Age, ChildId, DaycareId, AGE_COUNT, UNMATCHED_CAPACITY};
use crate::records::DaycareRecord;

/// A daycare with age-segmented capacity and a priority ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Daycare {
    pub id: DaycareId,
    /// Open seats per age.
    pub recruiting_numbers: [u32; AGE_COUNT],
    /// Groups of ages that pool their capacity.
    pub share_ages: Vec<Vec<Age>>,
    /// Tie-break order of applicants, highest priority first.
    pub priority: Vec<ChildId>,
    /// Scores parallel to `priority`.
    pub scores: Vec<f64>,
}

impl Daycare {
    pub fn from_record(record: &DaycareRecord) -> Result<Self> {
        if record.recruiting_numbers_list.len() != AGE_COUNT {
            return Err(MatchError::InvalidInput(format!(
                "daycare {} lists {} recruiting numbers, expected {}",
                record.id,
                record.recruiting_numbers_list.len(),
                AGE_COUNT
            )));
        }
        let mut recruiting_numbers = [0u32; AGE_COUNT];
        for (age, &seats) in record.recruiting_numbers_list.iter().enumerate() {
            recruiting_numbers[age] = u32::try_from(seats).map_err(|_| {
                MatchError::Config(format!(
                    "daycare {} has invalid capacity {} for age {}",
                    record.id, seats, age
                ))
            })?;
        }

        let mut seen = [false; AGE_COUNT];
        for group in &record.share_ages_list {
            for &age in group {
                if age >= AGE_COUNT || seen[age] {
                    return Err(MatchError::InvalidInput(format!(
                        "daycare {} share groups are not a partition of ages (age {})",
                        record.id, age
                    )));
                }
                seen[age] = true;
            }
        }

        if record.priority_child_id_list.len() != record.priority_score_list.len() {
            return Err(MatchError::InvalidInput(format!(
                "daycare {} has {} ranked children but {} scores",
                record.id,
                record.priority_child_id_list.len(),
                record.priority_score_list.len()
            )));
        }

        Ok(Self {
            id: record.id,
            recruiting_numbers,
            share_ages: record
                .share_ages_list
                .iter()
                .filter(|group| !group.is_empty())
                .cloned()
                .collect(),
            priority: record.priority_child_id_list.clone(),
            scores: record.priority_score_list.clone(),
        })
    }

    /// The synthetic daycare standing for "unmatched".
    ///
    /// Its priority list is filled during derivation.
    pub fn unmatched() -> Self {
        Self {
            id: DaycareId::UNMATCHED,
            recruiting_numbers: [UNMATCHED_CAPACITY; AGE_COUNT],
            share_ages: Vec::new(),
            priority: Vec::new(),
            scores: Vec::new(),
        }
    }

    /// All ages that belong to some pooling group.
    pub fn all_shared_ages(&self) -> Vec<Age> {
        self.share_ages.iter().flatten().copied().collect()
    }

    pub fn shares_capacity(&self) -> bool {
        !self.share_ages.is_empty()
    }

    /// Returns the pooling group containing `age`, or `[age]` if it is not pooled.
    pub fn related_ages(&self, age: Age) -> Vec<Age> {
        self.share_ages
            .iter()
            .find(|group| group.contains(&age))
            .cloned()
            .unwrap_or_else(|| vec![age])
    }
}
