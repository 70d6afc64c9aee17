//! Data-file schema for the road network.
//!
//! The network is plain data: a weighted adjacency map plus the hand-authored
//! main routes and feeder paths. Swapping the file swaps the network without
//! touching any matching logic.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NetworkError;

/// Duration used for any edge without an adjacency entry.
pub const DEFAULT_SEGMENT_MINUTES: f64 = 7.0;

/// Segment multiplier applied during the peak regime.
pub const DEFAULT_PEAK_MULTIPLIER: f64 = 1.4;

fn default_segment_minutes() -> f64 {
    DEFAULT_SEGMENT_MINUTES
}

fn default_peak_multiplier() -> f64 {
    DEFAULT_PEAK_MULTIPLIER
}

/// A backbone path from a recognised origin zone into the destination hub.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MainRouteSpec {
    pub name: String,
    /// Lower-case substrings that map a rider's free-text origin to this route.
    #[serde(default)]
    pub origin_keywords: Vec<String>,
    pub waypoints: Vec<String>,
}

/// A path that joins a main route at `merge_point`. Its last waypoint must be
/// the merge point itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeederSpec {
    pub name: String,
    pub merge_point: String,
    pub waypoints: Vec<String>,
}

/// Top-level network data file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_segment_minutes")]
    pub default_segment_minutes: f64,
    #[serde(default = "default_peak_multiplier")]
    pub peak_multiplier: f64,
    /// Waypoint -> neighbour -> baseline minutes. Edges are undirected; one
    /// direction is enough.
    #[serde(default)]
    pub adjacency: BTreeMap<String, BTreeMap<String, f64>>,
    pub main_routes: Vec<MainRouteSpec>,
    #[serde(default)]
    pub feeders: Vec<FeederSpec>,
}

impl NetworkConfig {
    pub fn from_json_str(json: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Structural checks. Missing edge durations are not an error; they fall
    /// back to `default_segment_minutes` at lookup time.
    pub fn validate(&self) -> Result<(), NetworkError> {
        if !is_valid_minutes(self.default_segment_minutes) {
            return Err(NetworkError::InvalidParameter("default_segment_minutes"));
        }
        if !is_valid_minutes(self.peak_multiplier) {
            return Err(NetworkError::InvalidParameter("peak_multiplier"));
        }
        if self.main_routes.is_empty() {
            return Err(NetworkError::NoMainRoutes);
        }
        for route in &self.main_routes {
            if route.waypoints.len() < 2 {
                return Err(NetworkError::RouteTooShort {
                    name: route.name.clone(),
                });
            }
        }
        for feeder in &self.feeders {
            if feeder.waypoints.len() < 2 {
                return Err(NetworkError::RouteTooShort {
                    name: feeder.name.clone(),
                });
            }
            if feeder.waypoints.last() != Some(&feeder.merge_point) {
                return Err(NetworkError::FeederMergeMismatch {
                    name: feeder.name.clone(),
                    merge_point: feeder.merge_point.clone(),
                });
            }
        }
        for (from, neighbours) in &self.adjacency {
            for (to, minutes) in neighbours {
                if !is_valid_minutes(*minutes) {
                    return Err(NetworkError::InvalidSegmentDuration {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn is_valid_minutes(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
