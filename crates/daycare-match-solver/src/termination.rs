//! Wall-clock limit.

use std::time::{Duration, Instant};

/// Default number of nodes between two clock reads.
pub const DEFAULT_CHECK_INTERVAL: u64 = 256;

/// A time limit polled every `check_interval` nodes.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use daycare_match_solver::Deadline;
///
/// let deadline = Deadline::new(Duration::ZERO).with_check_interval(4);
/// assert!(!deadline.is_expired(3));
/// assert!(deadline.is_expired(4));
/// ```
#[derive(Debug, Clone)]
pub struct Deadline {
    started: Instant,
    limit: Duration,
    check_interval: u64,
}

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            limit,
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }

    pub fn with_check_interval(mut self, interval: u64) -> Self {
        self.check_interval = interval.max(1);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether the limit has passed, reading the clock only on every
    /// `check_interval`-th node.
    pub fn is_expired(&self, nodes: u64) -> bool {
        nodes % self.check_interval == 0 && self.elapsed() >= self.limit
    }
}
