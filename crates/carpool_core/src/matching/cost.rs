use std::fmt::Debug;

use chrono::NaiveDateTime;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::network::{RoadNetwork, Route};
use crate::pricing::PricingConfig;
use crate::traffic::TrafficRegime;

/// Everything a cost estimator may look at for one candidate.
#[derive(Debug, Clone, Copy)]
pub struct CostQuote<'a> {
    pub network: &'a RoadNetwork,
    pub rider_route: &'a Route,
    pub driver_route: &'a Route,
    pub regime: TrafficRegime,
    pub departure: Option<NaiveDateTime>,
}

/// Prices a seat for a match candidate.
///
/// Implementations must not fail: a candidate always carries some price.
pub trait CostEstimator: Send + Sync + Debug {
    fn estimate(&self, quote: &CostQuote<'_>, rng: &mut dyn RngCore) -> f64;
}

/// Which estimator a matcher builds from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostStrategy {
    #[default]
    RoutePriced,
    PlaceholderRange,
}

impl CostStrategy {
    pub fn build(self, pricing: &PricingConfig) -> Box<dyn CostEstimator> {
        match self {
            CostStrategy::RoutePriced => Box::new(RoutePricedCost::new(pricing.clone())),
            CostStrategy::PlaceholderRange => Box::new(PlaceholderRangeCost::default()),
        }
    }
}

/// Prices the rider's own trip with the student fare formula. Distance comes
/// from the route's off-peak minutes at the off-peak speed.
#[derive(Debug, Clone, Default)]
pub struct RoutePricedCost {
    pricing: PricingConfig,
}

impl RoutePricedCost {
    pub fn new(pricing: PricingConfig) -> Self {
        Self { pricing }
    }

    pub fn estimated_distance_miles(&self, network: &RoadNetwork, route: &Route) -> f64 {
        let minutes = network.route_minutes(route, TrafficRegime::OffPeak);
        (minutes / self.pricing.off_peak_minutes_per_mile * 10.0).round() / 10.0
    }
}

impl CostEstimator for RoutePricedCost {
    fn estimate(&self, quote: &CostQuote<'_>, _rng: &mut dyn RngCore) -> f64 {
        let distance = self.estimated_distance_miles(quote.network, quote.rider_route);
        self.pricing.ride_price(distance, quote.departure)
    }
}

/// Uniform draw from a fixed band, to two decimals. Ignores the route.
#[derive(Debug, Clone)]
pub struct PlaceholderRangeCost {
    pub min: f64,
    pub max: f64,
}

impl Default for PlaceholderRangeCost {
    fn default() -> Self {
        Self { min: 4.0, max: 6.5 }
    }
}

impl CostEstimator for PlaceholderRangeCost {
    fn estimate(&self, _quote: &CostQuote<'_>, rng: &mut dyn RngCore) -> f64 {
        if self.max <= self.min {
            return self.min;
        }
        (rng.gen_range(self.min..self.max) * 100.0).round() / 100.0
    }
}
