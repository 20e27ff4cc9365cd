//! Daycare Match Core - entities and priority views for daycare matching
//!
//! This crate provides the data side of the matching model:
//! - Input records and strongly typed ids
//! - The raw entity model (children, daycares, families)
//! - The derivation pipeline producing per-age priority and capacity views
//! - Priority queries ("who outranks this child at this daycare")

pub mod context;
pub mod domain;
pub mod error;
pub mod ids;
pub mod priority;
pub mod records;

pub use context::{DerivedChild, DerivedDaycare, MatchingContext};
pub use domain::{Child, Daycare, Family, PreferenceTuple};
pub use error::{EntityKind, MatchError, Result};
pub use ids::{Age, ChildId, DaycareId, FamilyId, AGE_COUNT, UNMATCHED_CAPACITY, UNMATCHED_SCORE};
pub use priority::{ComparisonMode, PriorityQuery, RankingScope, SiblingPolicy, TIE_TOLERANCE};
pub use records::{ChildRecord, DaycareRecord, FamilyPreference, FamilyRecord, MatchingInput};
