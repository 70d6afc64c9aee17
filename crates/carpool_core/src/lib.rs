//! Route-matching and pricing engine for a student carpool demo.
//!
//! The engine matches a rider's request against a pool of drivers on a small
//! synthetic road network, estimates how much of each driver's path is shared
//! with the rider and how long the driver's trip becomes after a detour, and
//! prices rides against a simulated ride-hailing baseline.
//!
//! Everything here is synchronous and side-effect free. The [`network::RoadNetwork`]
//! is immutable once built, so it can be shared across threads and reused by
//! concurrent match calls.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod generators;
pub mod matching;
pub mod network;
pub mod pricing;
pub mod profile;
pub mod request;
pub mod rides;
pub mod time;
pub mod traffic;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use config::EngineConfig;
pub use error::{ConfigError, NetworkError, TimeParseError};
pub use matching::{MatchCandidate, MatcherConfig, RouteMatcher};
pub use network::{RoadNetwork, Route};
pub use pricing::{
    calculate_co2_saved, calculate_ride_price, estimate_external_fare, FareEstimate,
    PricingConfig,
};
pub use request::{RequestType, RideRequest};
pub use traffic::TrafficRegime;
