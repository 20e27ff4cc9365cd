//! Configuration system for daycare matching.
//!
//! Load matching configuration from TOML or YAML to control capacity
//! pooling, the blocking budget and the solver time limit without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use daycare_match_config::MatchConfig;
//! use std::time::Duration;
//!
//! let config = MatchConfig::from_toml_str(r#"
//!     share_capacity = true
//!     blocking_budget = 2
//!     solver_time_secs = 60
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(60));
//! assert_eq!(config.blocking_budget().unwrap(), 2);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use daycare_match_config::MatchConfig;
//!
//! let config = MatchConfig::load("matching.toml").unwrap_or_default();
//! assert_eq!(config.search_depth, 5);
//! ```

use std::path::Path;
use std::time::Duration;

use daycare_match_core::{ComparisonMode, RankingScope, SiblingPolicy, TIE_TOLERANCE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default solver time limit in seconds.
pub const DEFAULT_SOLVER_TIME_SECS: u64 = 360;

/// Default window for the tie scan.
pub const DEFAULT_SEARCH_DEPTH: usize = 5;

/// Default parallelism hint passed to the solver.
pub const DEFAULT_WORKER_COUNT: usize = 8;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Matching configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct MatchConfig {
    /// Pool capacity and rankings across ages of one sharing group.
    pub share_capacity: bool,

    /// Maximum number of blocking coalitions tolerated; 0 demands stability.
    pub blocking_budget: i64,

    /// Wall-clock limit handed to the solver.
    pub solver_time_secs: u64,

    /// Leave a child's siblings out of the children that outrank it.
    pub exclude_siblings: bool,

    /// Number of ranking slots, starting at the child, scanned for ties.
    pub search_depth: usize,

    /// Which "better" set decides whether a sibling group fits.
    pub comparison: ComparisonMode,

    /// Relative tolerance for tied priority scores.
    pub tie_tolerance: f64,

    /// Parallelism hint for the solver.
    pub worker_count: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            share_capacity: false,
            blocking_budget: 0,
            solver_time_secs: DEFAULT_SOLVER_TIME_SECS,
            exclude_siblings: true,
            search_depth: DEFAULT_SEARCH_DEPTH,
            comparison: ComparisonMode::default(),
            tie_tolerance: TIE_TOLERANCE,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }
}

impl MatchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_share_capacity(mut self, share: bool) -> Self {
        self.share_capacity = share;
        self
    }

    pub fn with_blocking_budget(mut self, budget: i64) -> Self {
        self.blocking_budget = budget;
        self
    }

    pub fn with_solver_time_secs(mut self, seconds: u64) -> Self {
        self.solver_time_secs = seconds;
        self
    }

    pub fn with_exclude_siblings(mut self, exclude: bool) -> Self {
        self.exclude_siblings = exclude;
        self
    }

    pub fn with_search_depth(mut self, depth: usize) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn with_comparison(mut self, comparison: ComparisonMode) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    /// Checks every field before any model is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.blocking_budget()?;
        if self.search_depth == 0 {
            return Err(ConfigError::Invalid(
                "search_depth must be at least 1".to_string(),
            ));
        }
        if !self.tie_tolerance.is_finite() || self.tie_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tie_tolerance must be a non-negative number, got {}",
                self.tie_tolerance
            )));
        }
        if self.worker_count == 0 {
            return Err(ConfigError::Invalid(
                "worker_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The blocking budget as an unsigned count.
    pub fn blocking_budget(&self) -> Result<u32, ConfigError> {
        u32::try_from(self.blocking_budget).map_err(|_| {
            ConfigError::Invalid(format!(
                "blocking_budget must be between 0 and {}, got {}",
                u32::MAX,
                self.blocking_budget
            ))
        })
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.solver_time_secs)
    }

    pub fn ranking_scope(&self) -> RankingScope {
        RankingScope::from_sharing(self.share_capacity)
    }

    pub fn sibling_policy(&self) -> SiblingPolicy {
        SiblingPolicy::from_exclusion(self.exclude_siblings)
    }
}
