//! The contract between the matching model and a solver backend.

use std::fmt;
use std::time::Duration;

use crate::expr::BoolVar;
use crate::model::BoolModel;

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The returned assignment is proven optimal.
    Optimal,
    /// An assignment was found but optimality is not proven.
    Feasible,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The time limit expired before any assignment was found.
    Unknown,
}

impl SolveStatus {
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Feasible => write!(f, "FEASIBLE"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Limits handed to the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveParams {
    /// Wall-clock budget.
    pub time_limit: Duration,
    /// Parallelism hint; backends may ignore it.
    pub worker_count: usize,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(360),
            worker_count: 8,
        }
    }
}

/// The solver's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResponse {
    pub status: SolveStatus,
    pub objective: Option<i64>,
    pub wall_time: Duration,
    values: Option<Vec<bool>>,
}

impl SolveResponse {
    /// A response carrying one value per model variable.
    pub fn with_solution(
        status: SolveStatus,
        values: Vec<bool>,
        objective: i64,
        wall_time: Duration,
    ) -> Self {
        Self {
            status,
            objective: Some(objective),
            wall_time,
            values: Some(values),
        }
    }

    pub fn without_solution(status: SolveStatus, wall_time: Duration) -> Self {
        Self {
            status,
            objective: None,
            wall_time,
            values: None,
        }
    }

    /// Value of `var`, if the response holds a solution.
    pub fn value(&self, var: BoolVar) -> Option<bool> {
        if !self.status.has_solution() {
            return None;
        }
        self.values
            .as_ref()
            .and_then(|v| v.get(var.index()).copied())
    }

    pub fn values(&self) -> Option<&[bool]> {
        self.values.as_deref()
    }
}

/// A backend able to solve a [`BoolModel`].
///
/// Implementations must return values for every variable when the status is
/// [`SolveStatus::Optimal`] or [`SolveStatus::Feasible`], and must respect
/// `params.time_limit`.
pub trait SolverService {
    fn solve(&self, model: &BoolModel, params: &SolveParams) -> SolveResponse;
}

impl<S: SolverService + ?Sized> SolverService for &S {
    fn solve(&self, model: &BoolModel, params: &SolveParams) -> SolveResponse {
        (**self).solve(model, params)
    }
}
