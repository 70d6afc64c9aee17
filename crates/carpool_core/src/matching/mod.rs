//! Rider-to-driver matching over the road network's composed routes.
//!
//! A greedy heuristic: each driver gets a route from a shuffled pool, is scored
//! by how much of the rider's path they share near the destination, and the
//! results are ranked by that overlap.

pub mod cost;
pub mod matcher;
pub mod overlap;
pub mod pool;
pub mod types;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use cost::{CostEstimator, CostQuote, CostStrategy, PlaceholderRangeCost, RoutePricedCost};
pub use matcher::RouteMatcher;
pub use overlap::{path_match, PathMatch};
pub use pool::{shuffle, RoutePool};
pub use types::{rank_candidates, MatchCandidate};

pub const DEFAULT_CANDIDATE_COUNT: usize = 3;
pub const DEFAULT_PICKUP_BUFFER_MINUTES: u32 = 3;
pub const MIN_OVERLAP_PERCENT: u8 = 40;
pub const MAX_OVERLAP_PERCENT: u8 = 98;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Drivers generated per request when the caller supplies none.
    pub candidate_count: usize,
    pub pickup_buffer_minutes: u32,
    pub min_overlap_percent: u8,
    pub max_overlap_percent: u8,
    pub cost_strategy: CostStrategy,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            candidate_count: DEFAULT_CANDIDATE_COUNT,
            pickup_buffer_minutes: DEFAULT_PICKUP_BUFFER_MINUTES,
            min_overlap_percent: MIN_OVERLAP_PERCENT,
            max_overlap_percent: MAX_OVERLAP_PERCENT,
            cost_strategy: CostStrategy::default(),
        }
    }
}

impl MatcherConfig {
    /// Overlap bounds must be ordered percentages.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_overlap_percent > self.max_overlap_percent {
            return Err(ConfigError::Invalid(format!(
                "matcher overlap bounds are reversed: min {} > max {}",
                self.min_overlap_percent, self.max_overlap_percent
            )));
        }
        if self.max_overlap_percent > 100 {
            return Err(ConfigError::Invalid(format!(
                "matcher max overlap {} exceeds 100",
                self.max_overlap_percent
            )));
        }
        Ok(())
    }

    pub fn with_candidate_count(mut self, count: usize) -> Self {
        self.candidate_count = count;
        self
    }

    pub fn with_pickup_buffer_minutes(mut self, minutes: u32) -> Self {
        self.pickup_buffer_minutes = minutes;
        self
    }

    /// Bounds are reordered if given backwards.
    pub fn with_overlap_bounds(mut self, min: u8, max: u8) -> Self {
        self.min_overlap_percent = min.min(max);
        self.max_overlap_percent = max.max(min);
        self
    }

    pub fn with_cost_strategy(mut self, strategy: CostStrategy) -> Self {
        self.cost_strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MatcherConfig::default().validate().is_ok());
    }

    #[test]
    fn reversed_or_oversized_bounds_are_invalid() {
        let reversed = MatcherConfig {
            min_overlap_percent: 90,
            max_overlap_percent: 50,
            ..Default::default()
        };
        assert!(matches!(reversed.validate(), Err(ConfigError::Invalid(_))));
        let oversized = MatcherConfig {
            max_overlap_percent: 120,
            ..Default::default()
        };
        assert!(matches!(oversized.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn setter_reorders_bounds() {
        let config = MatcherConfig::default().with_overlap_bounds(90, 50);
        assert_eq!((config.min_overlap_percent, config.max_overlap_percent), (50, 90));
        assert!(config.validate().is_ok());
    }
}
