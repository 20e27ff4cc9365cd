//! Daycare Match Model - the matching problem as a boolean constraint system
//!
//! This crate turns a derived [`MatchingContext`](daycare_match_core::MatchingContext)
//! into boolean decision variables and linear constraints:
//! - [`BoolModel`]: variables, linear constraints with enforcement literals, objective
//! - [`SolverService`]: the contract any solver backend implements
//! - [`MatchingModelBuilder`]: family positions, assignments, eligibility and blocking
//! - [`MatchOutcome`]: readback of a solver response into per-child assignments
//! - [`audit_outcome`]: solver-independent check of capacity, transfers and blocking

pub mod audit;
pub mod builder;
pub mod eligibility;
pub mod expr;
pub mod model;
pub mod outcome;
pub mod settings;
pub mod solver;

#[cfg(test)]
mod test_support;

pub use audit::{audit_outcome, CapacityViolation, OutcomeAudit};
pub use builder::{MatchingModel, MatchingModelBuilder};
pub use eligibility::SiblingGroup;
pub use expr::{BoolVar, LinearExpr, Literal};
pub use model::{BoolModel, Comparison, LinearConstraint};
pub use outcome::MatchOutcome;
pub use settings::ModelSettings;
pub use solver::{SolveParams, SolveResponse, SolveStatus, SolverService};
