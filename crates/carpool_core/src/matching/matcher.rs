use std::sync::Arc;

use log::debug;
use rand::Rng;

use super::cost::{CostEstimator, CostQuote};
use super::overlap::path_match;
use super::pool::RoutePool;
use super::types::{rank_candidates, MatchCandidate};
use super::MatcherConfig;
use crate::generators;
use crate::network::{RoadNetwork, Route};
use crate::pricing::PricingConfig;
use crate::profile::UserProfile;
use crate::request::RideRequest;

/// Greedy single-rider matcher over the network's composed routes.
///
/// The network is shared read-only; every call owns its route pool and
/// returns fresh candidates.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
    network: Arc<RoadNetwork>,
    config: MatcherConfig,
    cost: Arc<dyn CostEstimator>,
}

impl RouteMatcher {
    pub fn new(network: Arc<RoadNetwork>, config: MatcherConfig, pricing: &PricingConfig) -> Self {
        let cost: Arc<dyn CostEstimator> = Arc::from(config.cost_strategy.build(pricing));
        Self {
            network,
            config,
            cost,
        }
    }

    pub fn with_cost_estimator(mut self, cost: Arc<dyn CostEstimator>) -> Self {
        self.cost = cost;
        self
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// The rider's backbone with their literal origin and destination at the ends.
    pub fn rider_route(&self, request: &RideRequest) -> Route {
        self.network
            .route_for_origin(&request.origin)
            .clone()
            .with_endpoints(&request.origin, &request.destination)
    }

    /// One candidate per driver, ranked by overlap (highest first).
    pub fn match_drivers<R: Rng>(
        &self,
        request: &RideRequest,
        drivers: &[UserProfile],
        rng: &mut R,
    ) -> Vec<MatchCandidate> {
        let regime = request.traffic_regime();
        let rider_route = self.rider_route(request);
        let rider_minutes = self.network.route_duration(&rider_route, regime);
        let departure = request.departure_time(rider_minutes);
        let bounds = self.config.min_overlap_percent..=self.config.max_overlap_percent;

        let routes = self
            .network
            .composed_routes()
            .iter()
            .map(|composed| composed.route.clone())
            .collect();
        let mut pool = RoutePool::shuffled(routes, rng);

        let mut candidates = Vec::with_capacity(drivers.len());
        for driver in drivers {
            // Validation guarantees at least one main route, so the pool is never empty.
            let Some(route) = pool.draw(rng) else {
                break;
            };
            let driver_route = route.with_destination(&request.destination);
            let path = path_match(&rider_route, &driver_route, bounds.clone());

            let approach = self.network.route_duration(&path.driver_unshared, regime);
            let original = self.network.route_duration(&driver_route, regime);
            let combined = approach + rider_minutes + self.config.pickup_buffer_minutes;
            let estimated_cost = self.cost.estimate(
                &CostQuote {
                    network: &self.network,
                    rider_route: &rider_route,
                    driver_route: &driver_route,
                    regime,
                    departure,
                },
                rng,
            );

            debug!(
                "candidate {} via {:?}: overlap {}%, approach {} min, combined {} min",
                driver.id,
                driver_route.origin(),
                path.overlap_percent,
                approach,
                combined
            );
            candidates.push(MatchCandidate {
                id: format!("match_{}", driver.id),
                driver: driver.clone(),
                route: driver_route,
                route_overlap_percentage: path.overlap_percent,
                driver_original_duration_minutes: original,
                driver_approach_duration_minutes: approach,
                driver_combined_duration_minutes: combined,
                estimated_cost,
            });
        }

        rank_candidates(&mut candidates);
        candidates
    }

    /// Match against a generated pool of `pool_size` drivers.
    pub fn match_riders<R: Rng>(
        &self,
        request: &RideRequest,
        pool_size: usize,
        rng: &mut R,
    ) -> Vec<MatchCandidate> {
        let drivers = generators::driver_pool(pool_size, rng);
        self.match_drivers(request, &drivers, rng)
    }

    /// [`Self::match_riders`] with the configured candidate count.
    pub fn match_request<R: Rng>(&self, request: &RideRequest, rng: &mut R) -> Vec<MatchCandidate> {
        self.match_riders(request, self.config.candidate_count, rng)
    }
}
