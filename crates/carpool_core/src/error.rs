//! Error types for configuration loading and input parsing.
//!
//! Pricing and matching never fail; everything that can go wrong happens while
//! a road network or engine configuration is being loaded, or while a
//! collaborator-supplied time string is being read.

use std::path::PathBuf;

use thiserror::Error;

/// Problems found while loading or validating a road network.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The data file could not be read.
    #[error("failed to read network file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The data file is not valid JSON for the network schema.
    #[error("failed to parse network data: {0}")]
    Parse(#[from] serde_json::Error),
    /// Matching needs at least one main route to draw from.
    #[error("road network declares no main routes")]
    NoMainRoutes,
    /// Every route needs an origin and a destination.
    #[error("route `{name}` has fewer than two waypoints")]
    RouteTooShort { name: String },
    /// A feeder must end on the waypoint it merges into.
    #[error("feeder `{name}` does not end at its merge point `{merge_point}`")]
    FeederMergeMismatch { name: String, merge_point: String },
    #[error("segment {from} -> {to} has an invalid duration")]
    InvalidSegmentDuration { from: String, to: String },
    /// A network-wide parameter (default duration, peak multiplier) is negative or not finite.
    #[error("network parameter `{0}` must be a finite, non-negative number")]
    InvalidParameter(&'static str),
}

/// Malformed `HH:MM` (or bare hour) time-of-day input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("expected HH:MM or a bare hour, got `{0}`")]
    Format(String),
    #[error("time `{0}` is out of range")]
    OutOfRange(String),
}

/// Problems loading an [`crate::EngineConfig`] file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    /// Parsed, but a value is out of range.
    #[error("invalid engine config: {0}")]
    Invalid(String),
}
