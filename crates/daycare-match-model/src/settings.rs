//! Settings that shape the model.

use daycare_match_config::{ConfigError, MatchConfig, DEFAULT_SEARCH_DEPTH};
use daycare_match_core::{ComparisonMode, RankingScope, SiblingPolicy, TIE_TOLERANCE};

/// Model construction settings, derived from a validated [`MatchConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSettings {
    pub scope: RankingScope,
    pub siblings: SiblingPolicy,
    pub comparison: ComparisonMode,
    pub search_depth: usize,
    pub tie_tolerance: f64,
    pub blocking_budget: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            scope: RankingScope::PerAge,
            siblings: SiblingPolicy::Exclude,
            comparison: ComparisonMode::WeakWithTies,
            search_depth: DEFAULT_SEARCH_DEPTH,
            tie_tolerance: TIE_TOLERANCE,
            blocking_budget: 0,
        }
    }
}

impl ModelSettings {
    /// Validates `config` and extracts the model settings.
    pub fn from_config(config: &MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scope: config.ranking_scope(),
            siblings: config.sibling_policy(),
            comparison: config.comparison,
            search_depth: config.search_depth,
            tie_tolerance: config.tie_tolerance,
            blocking_budget: config.blocking_budget()?,
        })
    }

    pub fn with_scope(mut self, scope: RankingScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_siblings(mut self, siblings: SiblingPolicy) -> Self {
        self.siblings = siblings;
        self
    }

    pub fn with_blocking_budget(mut self, budget: u32) -> Self {
        self.blocking_budget = budget;
        self
    }

    pub fn with_comparison(mut self, comparison: ComparisonMode) -> Self {
        self.comparison = comparison;
        self
    }
}
