//! Test helpers for common test setup and utilities.
//!
//! Shared fixtures for unit tests, integration tests and benches.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::network::RoadNetwork;
use crate::pricing::PricingConfig;
use crate::profile::{Chattiness, Preferences, Role, UserProfile};
use crate::request::RideRequest;
use crate::rides::{Ride, RideOffer};

/// Destination label the bundled network's routes end at.
pub const FIU_ENGINEERING: &str = "FIU Engineering Center, Miami, FL";

/// The bundled Miami/FIU network.
///
/// # Panics
///
/// Panics if the embedded network data fails validation (should never happen).
pub fn test_network() -> Arc<RoadNetwork> {
    Arc::new(RoadNetwork::miami_fiu().expect("embedded network should be valid"))
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A time on Tuesday 2025-01-14.
///
/// # Panics
///
/// Panics if `hour`/`minute` are out of range.
pub fn tuesday_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 14)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid test time")
}

/// Quiet profile with a fixed name and no service tier.
pub fn sample_profile(id: &str, role: Role) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        name: "Test Student".to_string(),
        email: format!("{id}@fiu.edu"),
        university: "Florida International University".to_string(),
        role,
        preferences: Preferences {
            music: "Podcasts".to_string(),
            chattiness: Chattiness::Quiet,
        },
        rating: Some(4.8),
        service_tier: None,
    }
}

/// A 10-mile Tuesday-morning listing from Kendall by an owner `driver_id`.
pub fn sample_ride(id: &str, driver_id: &str, destination: &str) -> Ride {
    let offer = RideOffer {
        origin: "Kendall, FL".to_string(),
        destination: destination.to_string(),
        departure_time: tuesday_at(8, 0),
        available_seats: 3,
        price: 0.0,
        event_id: None,
    };
    Ride::publish(
        id,
        sample_profile(driver_id, Role::Owner),
        offer,
        10.0,
        &PricingConfig::default(),
    )
}

/// Kendall rider arriving at the engineering center by 08:00.
pub fn kendall_request() -> RideRequest {
    RideRequest::new("Kendall, FL", FIU_ENGINEERING).with_arrive_by("08:00")
}
