//! Search statistics.

use std::time::Duration;

/// Counters collected during one search.
///
/// # Example
///
/// ```
/// use daycare_match_solver::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.record_node();
/// stats.record_solution();
///
/// assert_eq!(stats.nodes, 1);
/// assert_eq!(stats.solutions, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes visited.
    pub nodes: u64,
    /// Nodes abandoned because propagation failed.
    pub conflicts: u64,
    /// Nodes abandoned because the objective bound could not beat the incumbent.
    pub pruned: u64,
    /// Variables fixed by propagation rather than by branching.
    pub propagations: u64,
    /// Improving solutions found.
    pub solutions: u64,
    /// Time spent searching.
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn record_node(&mut self) {
        self.nodes += 1;
    }

    pub fn record_conflict(&mut self) {
        self.conflicts += 1;
    }

    pub fn record_pruned(&mut self) {
        self.pruned += 1;
    }

    pub fn record_solution(&mut self) {
        self.solutions += 1;
    }

    /// Nodes visited per second.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }
}
