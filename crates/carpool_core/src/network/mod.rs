//! Road network model: a small fixed graph of named waypoints standing in for
//! real roads.
//!
//! The network provides three things to the matcher:
//!
//! - **Segment durations** between adjacent waypoints, looked up in either
//!   direction, with a default for unknown edges.
//! - **Composed routes**: every main route plus feeders spliced onto them. This
//!   is the pool a driver's route is drawn from.
//! - **Route durations** under a peak/off-peak [`TrafficRegime`].
//!
//! [`RoadNetwork::route_for_origin`] maps a free-text origin onto a main route
//! by keyword. It is a heuristic, not a geocoder: anything it does not
//! recognise lands on the first main route.

mod compose;
pub mod config;
mod route;

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use log::warn;

use crate::error::NetworkError;
use crate::traffic::TrafficRegime;

pub use compose::ComposedRoute;
pub use config::{FeederSpec, MainRouteSpec, NetworkConfig};
pub use route::Route;

/// Embedded default network: Miami suburbs converging on the FIU Engineering Center.
const MIAMI_FIU_JSON: &str = include_str!("../../data/miami_fiu.json");

/// A main route with its lower-cased origin keywords.
#[derive(Clone, Debug)]
pub struct MainRoute {
    pub name: String,
    pub origin_keywords: Vec<String>,
    pub route: Route,
}

/// Immutable, validated road network.
#[derive(Clone, Debug)]
pub struct RoadNetwork {
    name: String,
    default_segment_minutes: f64,
    peak_multiplier: f64,
    adjacency: BTreeMap<String, BTreeMap<String, f64>>,
    /// Never empty; checked in [`RoadNetwork::from_config`].
    main_routes: Vec<MainRoute>,
    composed: Vec<ComposedRoute>,
}

impl RoadNetwork {
    /// Validate `config` and precompute the driver route pool.
    pub fn from_config(config: NetworkConfig) -> Result<Self, NetworkError> {
        config.validate()?;

        let composed = compose::compose_routes(&config.main_routes, &config.feeders);
        let main_routes = config
            .main_routes
            .into_iter()
            .map(|spec| MainRoute {
                name: spec.name,
                origin_keywords: spec
                    .origin_keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .collect(),
                route: Route::new(spec.waypoints),
            })
            .collect();

        let network = Self {
            name: config.name,
            default_segment_minutes: config.default_segment_minutes,
            peak_multiplier: config.peak_multiplier,
            adjacency: config.adjacency,
            main_routes,
            composed,
        };
        network.warn_missing_durations();
        Ok(network)
    }

    pub fn from_json_str(json: &str) -> Result<Self, NetworkError> {
        Self::from_config(NetworkConfig::from_json_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        Self::from_config(NetworkConfig::from_path(path)?)
    }

    /// The bundled Miami/FIU network.
    pub fn miami_fiu() -> Result<Self, NetworkError> {
        Self::from_json_str(MIAMI_FIU_JSON)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_segment_minutes(&self) -> f64 {
        self.default_segment_minutes
    }

    pub fn peak_multiplier(&self) -> f64 {
        self.peak_multiplier
    }

    pub fn main_routes(&self) -> &[MainRoute] {
        &self.main_routes
    }

    /// All main and composite routes. Order is fixed; callers shuffle.
    pub fn composed_routes(&self) -> &[ComposedRoute] {
        &self.composed
    }

    /// Baseline minutes between two adjacent waypoints, in either direction.
    /// Unknown pairs take the network default.
    pub fn segment_duration(&self, a: &str, b: &str) -> f64 {
        self.lookup(a, b)
            .or_else(|| self.lookup(b, a))
            .unwrap_or(self.default_segment_minutes)
    }

    fn lookup(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency.get(from).and_then(|n| n.get(to)).copied()
    }

    /// Unrounded route minutes. Each segment is scaled by the regime factor.
    pub fn route_minutes(&self, route: &Route, regime: TrafficRegime) -> f64 {
        let factor = regime.segment_factor(self.peak_multiplier);
        route
            .waypoints()
            .windows(2)
            .map(|pair| self.segment_duration(&pair[0], &pair[1]) * factor)
            .sum()
    }

    /// Route duration in whole minutes. Routes shorter than two waypoints take 0.
    pub fn route_duration(&self, route: &Route, regime: TrafficRegime) -> u32 {
        self.route_minutes(route, regime).round() as u32
    }

    /// Pick the main route for a free-text origin by case-insensitive keyword
    /// containment, defaulting to the first main route.
    pub fn route_for_origin(&self, origin: &str) -> &Route {
        let origin = origin.to_lowercase();
        self.main_routes
            .iter()
            .find(|main| {
                main.origin_keywords
                    .iter()
                    .any(|keyword| !keyword.is_empty() && origin.contains(keyword.as_str()))
            })
            .map_or(&self.main_routes[0].route, |main| &main.route)
    }

    fn warn_missing_durations(&self) {
        let mut seen = HashSet::new();
        for composed in &self.composed {
            for pair in composed.route.waypoints().windows(2) {
                let (a, b) = (pair[0].as_str(), pair[1].as_str());
                if self.lookup(a, b).is_none() && self.lookup(b, a).is_none() && seen.insert((a, b)) {
                    warn!(
                        "network `{}`: no duration for {a} -> {b}, using {} min",
                        self.name, self.default_segment_minutes
                    );
                }
            }
        }
    }
}
