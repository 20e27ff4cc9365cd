//! Daycare Match Solver - a reference backend for the solver contract
//!
//! [`BranchAndBoundSolver`] implements
//! [`SolverService`](daycare_match_model::SolverService) with a
//! deterministic depth-first search:
//! - trail-based backtracking over boolean variables in index order
//! - bounds propagation over linear constraints and their enforcement literals
//! - pruning on the objective's optimistic bound
//! - a wall-clock limit checked every few nodes
//!
//! The search runs on the calling thread; the worker-count hint is ignored.

mod propagate;
pub mod search;
pub mod stats;
pub mod termination;

pub use search::BranchAndBoundSolver;
pub use stats::SearchStats;
pub use termination::Deadline;
