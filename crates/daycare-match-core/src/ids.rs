//! Strongly typed identifiers and shared constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of age groups (ages 0 through 5).
pub const AGE_COUNT: usize = 6;

/// Capacity of the synthetic unmatched daycare at every age.
pub const UNMATCHED_CAPACITY: u32 = 9999;

/// Priority score shared by every applicant of the unmatched daycare.
pub const UNMATCHED_SCORE: f64 = 100.0;

/// Age of a child, in `0..AGE_COUNT`.
pub type Age = usize;

/// Child identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildId(pub u32);

/// Family identifier. A child without a family forms its own family with the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyId(pub u32);

/// Daycare identifier. [`DaycareId::UNMATCHED`] stands for "no daycare".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaycareId(pub u32);

impl DaycareId {
    /// The synthetic "unmatched" daycare.
    pub const UNMATCHED: DaycareId = DaycareId(9999);

    pub fn is_unmatched(self) -> bool {
        self == Self::UNMATCHED
    }

    /// Maps an optional id to the unmatched sentinel when absent.
    pub fn or_unmatched(id: Option<DaycareId>) -> DaycareId {
        id.unwrap_or(Self::UNMATCHED)
    }
}

impl ChildId {
    /// The family a child belongs to when no family id was given.
    pub fn own_family(self) -> FamilyId {
        FamilyId(self.0)
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DaycareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
