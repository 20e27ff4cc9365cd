//! Error types for daycare matching

use std::fmt;

use thiserror::Error;

use crate::ids::{ChildId, DaycareId};

/// The kind of entity an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Child,
    Daycare,
    Family,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Child => write!(f, "child"),
            EntityKind::Daycare => write!(f, "daycare"),
            EntityKind::Family => write!(f, "family"),
        }
    }
}

/// Main error type for model construction.
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    /// An id referenced an entity that does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: u32 },

    /// A child was looked up in a priority list that does not rank it
    #[error("child {child} is not ranked by daycare {daycare}")]
    NotRanked { child: ChildId, daycare: DaycareId },

    /// Input records are inconsistent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input violates a configuration constraint (e.g. negative capacity)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MatchError {
    pub fn child_not_found(id: ChildId) -> Self {
        MatchError::NotFound {
            kind: EntityKind::Child,
            id: id.0,
        }
    }

    pub fn daycare_not_found(id: DaycareId) -> Self {
        MatchError::NotFound {
            kind: EntityKind::Daycare,
            id: id.0,
        }
    }

    pub fn family_not_found(id: crate::ids::FamilyId) -> Self {
        MatchError::NotFound {
            kind: EntityKind::Family,
            id: id.0,
        }
    }
}

/// Result type alias for daycare matching operations
pub type Result<T> = std::result::Result<T, MatchError>;
