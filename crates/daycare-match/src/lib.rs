//! Daycare Match - assign children to daycares by family preference
//!
//! Families rank joint preference positions, daycares rank children, and the
//! matching maximizes the number of placed children while keeping siblings
//! together and tolerating at most a configured number of blocking families.
//!
//! # Example
//!
//! ```
//! use daycare_match::prelude::*;
//!
//! let input = MatchingInput {
//!     children: vec![ChildRecord::new(1, 0).with_preferences([Some(10), None])],
//!     daycares: vec![DaycareRecord::new(10, [1, 0, 0, 0, 0, 0]).with_priority([(1, 50.0)])],
//!     families: vec![FamilyRecord::new(1, [1]).with_preferences([
//!         FamilyPreference::single(Some(10)),
//!         FamilyPreference::single(None),
//!     ])],
//! };
//!
//! let outcome = solve(&input, &MatchConfig::default()).unwrap();
//! assert_eq!(outcome.status, SolveStatus::Optimal);
//! assert_eq!(outcome.assigned_daycare(ChildId(1)), DaycareId(10));
//! ```

mod run;

pub use run::{run_matching, solve, RunError};

pub use daycare_match_config::{ConfigError, MatchConfig};
pub use daycare_match_core::{
    ChildId, ChildRecord, ComparisonMode, DaycareId, DaycareRecord, FamilyId, FamilyPreference,
    FamilyRecord, MatchError, MatchingContext, MatchingInput, RankingScope, SiblingPolicy,
};
pub use daycare_match_model::{
    audit_outcome, BoolModel, MatchOutcome, MatchingModelBuilder, ModelSettings, OutcomeAudit,
    SolveParams, SolveResponse, SolveStatus, SolverService,
};
pub use daycare_match_solver::BranchAndBoundSolver;

#[cfg(feature = "console")]
pub use daycare_match_console as console;

pub mod prelude {
    pub use super::{run_matching, solve, RunError};
    pub use super::{
        ChildId, ChildRecord, DaycareId, DaycareRecord, FamilyId, FamilyPreference, FamilyRecord,
        MatchingInput,
    };
    pub use super::{MatchConfig, MatchOutcome, SolveStatus, SolverService};
}
