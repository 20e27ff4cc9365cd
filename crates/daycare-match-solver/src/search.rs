//! Depth-first branch and bound.

use daycare_match_model::{BoolModel, SolveParams, SolveResponse, SolveStatus, SolverService};
use tracing::debug;

use crate::propagate::Propagator;
use crate::stats::SearchStats;
use crate::termination::{Deadline, DEFAULT_CHECK_INTERVAL};

/// Exhaustive depth-first search with propagation and objective pruning.
///
/// Variables are branched on in index order, `true` before `false`, so the
/// search is deterministic: the same model and a sufficient time limit
/// always yield the same assignment.
///
/// # Example
///
/// ```
/// use daycare_match_model::{BoolModel, LinearExpr, SolveParams, SolveStatus, SolverService};
/// use daycare_match_solver::BranchAndBoundSolver;
///
/// let mut model = BoolModel::new();
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// model.add_le(LinearExpr::sum([a, b]), 1);
/// model.maximize(LinearExpr::new().term(a, 1).term(b, 2));
///
/// let response = BranchAndBoundSolver::new().solve(&model, &SolveParams::default());
/// assert_eq!(response.status, SolveStatus::Optimal);
/// assert_eq!(response.objective, Some(2));
/// assert_eq!(response.value(b), Some(true));
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBoundSolver {
    check_interval: u64,
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchAndBoundSolver {
    pub fn new() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }

    /// Reads the clock every `interval` nodes.
    pub fn with_check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval.max(1);
        self
    }

    /// Solves `model` and also returns the search statistics.
    pub fn solve_with_stats(
        &self,
        model: &BoolModel,
        params: &SolveParams,
    ) -> (SolveResponse, SearchStats) {
        let deadline = Deadline::new(params.time_limit).with_check_interval(self.check_interval);
        debug!(
            event = "search_start",
            variables = model.var_count(),
            constraints = model.constraints().len(),
            worker_count = params.worker_count,
        );

        let mut search = Search::new(model, deadline);
        let end = search.run();
        search.stats.elapsed = search.deadline.elapsed();

        let status = match (end, &search.best) {
            (SearchEnd::Exhausted, Some(_)) => SolveStatus::Optimal,
            (SearchEnd::Exhausted, None) => SolveStatus::Infeasible,
            (SearchEnd::TimedOut, Some(_)) => SolveStatus::Feasible,
            (SearchEnd::TimedOut, None) => SolveStatus::Unknown,
        };
        let wall_time = search.stats.elapsed;
        let stats = search.stats.clone();
        debug!(
            event = "search_end",
            status = %status,
            nodes = stats.nodes,
            conflicts = stats.conflicts,
            pruned = stats.pruned,
            solutions = stats.solutions,
            elapsed_ms = stats.elapsed.as_millis() as u64,
        );

        let response = match search.best {
            Some(best) => SolveResponse::with_solution(status, best.values, best.objective, wall_time),
            None => SolveResponse::without_solution(status, wall_time),
        };
        (response, stats)
    }
}

impl SolverService for BranchAndBoundSolver {
    fn solve(&self, model: &BoolModel, params: &SolveParams) -> SolveResponse {
        self.solve_with_stats(model, params).0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchEnd {
    Exhausted,
    TimedOut,
}

#[derive(Debug, Clone)]
struct Incumbent {
    objective: i64,
    values: Vec<bool>,
}

// A branching decision; `tried_false` once both values have been explored.
#[derive(Debug, Clone, Copy)]
struct Frame {
    var: usize,
    trail_len: usize,
    tried_false: bool,
}

struct Search<'m> {
    model: &'m BoolModel,
    propagator: Propagator<'m>,
    deadline: Deadline,
    stack: Vec<Frame>,
    best: Option<Incumbent>,
    stats: SearchStats,
}

impl<'m> Search<'m> {
    fn new(model: &'m BoolModel, deadline: Deadline) -> Self {
        Self {
            model,
            propagator: Propagator::new(model),
            deadline,
            stack: Vec::new(),
            best: None,
            stats: SearchStats::default(),
        }
    }

    fn run(&mut self) -> SearchEnd {
        if self.propagator.propagate_all().is_err() {
            self.stats.record_conflict();
            return SearchEnd::Exhausted;
        }
        let ceiling = self.propagator.optimistic_bound(self.model.objective());
        let mut consistent = true;

        loop {
            self.stats.record_node();
            if self.deadline.is_expired(self.stats.nodes) {
                return self.finish(SearchEnd::TimedOut);
            }

            if consistent && self.cannot_improve() {
                self.stats.record_pruned();
                consistent = false;
            } else if !consistent {
                self.stats.record_conflict();
            }

            if consistent {
                let from = self.stack.last().map_or(0, |f| f.var + 1);
                match self.propagator.next_unassigned(from) {
                    Some(var) => {
                        self.stack.push(Frame {
                            var,
                            trail_len: self.propagator.trail_len(),
                            tried_false: false,
                        });
                        consistent = self.propagator.decide(var, true).is_ok();
                        continue;
                    }
                    None => {
                        self.record_solution();
                        if self.best.as_ref().is_some_and(|b| b.objective >= ceiling) {
                            return self.finish(SearchEnd::Exhausted);
                        }
                    }
                }
            }

            match self.backtrack() {
                Some(ok) => consistent = ok,
                None => return self.finish(SearchEnd::Exhausted),
            }
        }
    }

    fn finish(&mut self, end: SearchEnd) -> SearchEnd {
        self.stats.propagations = self.propagator.fixed_count();
        end
    }

    fn cannot_improve(&self) -> bool {
        self.best.as_ref().is_some_and(|best| {
            self.propagator.optimistic_bound(self.model.objective()) <= best.objective
        })
    }

    fn record_solution(&mut self) {
        let values = self.propagator.snapshot();
        let objective = self.model.objective_value(&values);
        debug_assert!(self.model.is_feasible(&values));
        self.stats.record_solution();
        debug!(
            event = "progress",
            nodes = self.stats.nodes,
            objective,
            elapsed_ms = self.deadline.elapsed().as_millis() as u64,
        );
        self.best = Some(Incumbent { objective, values });
    }

    // Flips the deepest decision still holding `true`; `None` once every
    // branch has been explored.
    fn backtrack(&mut self) -> Option<bool> {
        while let Some(frame) = self.stack.last_mut() {
            let Frame {
                var,
                trail_len,
                tried_false,
            } = *frame;
            self.propagator.undo_to(trail_len);
            if tried_false {
                self.stack.pop();
                continue;
            }
            frame.tried_false = true;
            return Some(self.propagator.decide(var, false).is_ok());
        }
        None
    }
}

#[cfg(test)]
mod tests;
