//! Synthetic drivers, listings and posted requests for demos and tests.
//!
//! Prices, CO2 figures and fare estimates go through [`crate::rides::Ride::publish`]
//! and the pricing engine; nothing here recomputes them.

use chrono::{Duration, NaiveDateTime, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::pricing::PricingConfig;
use crate::profile::{Chattiness, Preferences, Role, ServiceTier, UserProfile};
use crate::request::RequestType;
use crate::rides::{PostedRequest, Ride, RideOffer};

pub const UNIVERSITY: &str = "Florida International University";

pub const FIRST_NAMES: &[&str] = &[
    "Emily", "Jacob", "Sophia", "Michael", "Isabella", "Ethan", "Olivia", "William", "Ava", "James",
    "Mia", "Benjamin", "Charlotte", "Daniel",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson",
];

pub const MUSIC_PREFS: &[&str] = &[
    "Pop", "Indie Rock", "Hip Hop", "Classical", "EDM", "Country", "Podcasts",
];

pub const DEMO_ORIGINS: &[&str] = &[
    "Brickell, Miami",
    "Kendall, FL",
    "Doral, FL",
    "South Miami, FL",
    "Pinecrest, FL",
    "Hialeah, FL",
    "Coral Gables, FL",
];

pub const DEMO_DESTINATIONS: &[&str] = &[
    "FIU MMC Campus",
    "FIU Engineering Center",
    "FIU PG6 Tech Station",
    "FIU Green Library",
    "FIU Graham Center",
];

pub const REQUEST_DETAILS: &[&str] = &[
    "Need to get to my morning lecture.",
    "Looking for a ride for my evening lab session.",
    "Anyone heading to campus from the south?",
    "My car is in the shop, need a ride for a couple of days.",
    "Hoping to carpool to save on gas!",
];

const CHATTINESS: [Chattiness; 3] = [Chattiness::Quiet, Chattiness::Chatty, Chattiness::Depends];
const SERVICE_TIERS: [ServiceTier; 3] = [ServiceTier::Standard, ServiceTier::Premium, ServiceTier::Plus];
const QUARTER_HOURS: [u32; 4] = [0, 15, 30, 45];

fn pick<'a, R: Rng>(items: &[&'a str], rng: &mut R) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub fn random_profile<R: Rng>(id: impl Into<String>, role: Role, rng: &mut R) -> UserProfile {
    let first = pick(FIRST_NAMES, rng);
    let last = pick(LAST_NAMES, rng);
    UserProfile {
        id: id.into(),
        name: format!("{first} {last}"),
        email: format!("{}.{}@fiu.edu", first.to_lowercase(), last.to_lowercase()),
        university: UNIVERSITY.to_string(),
        role,
        preferences: Preferences {
            music: pick(MUSIC_PREFS, rng).to_string(),
            chattiness: CHATTINESS[rng.gen_range(0..CHATTINESS.len())],
        },
        rating: Some(round_to(rng.gen_range(4.5..=5.0), 1)),
        service_tier: Some(SERVICE_TIERS[rng.gen_range(0..SERVICE_TIERS.len())]),
    }
}

/// `count` driver profiles with ids unique within the batch.
pub fn driver_pool<R: Rng>(count: usize, rng: &mut R) -> Vec<UserProfile> {
    let batch: u32 = rng.gen();
    (0..count)
        .map(|i| random_profile(format!("user_random_{batch:08x}_{i}"), Role::Owner, rng))
        .collect()
}

/// Listings departing hourly from `now`, each at a random quarter hour.
pub fn generate_rides<R: Rng>(
    count: usize,
    now: NaiveDateTime,
    pricing: &PricingConfig,
    rng: &mut R,
) -> Vec<Ride> {
    let batch: u32 = rng.gen();
    (0..count)
        .map(|i| {
            let distance_miles = round_to(rng.gen_range(5.0..=25.0), 1);
            let hour = now + Duration::hours(i as i64 + 1);
            let minute = QUARTER_HOURS[rng.gen_range(0..QUARTER_HOURS.len())];
            let departure_time = hour
                .with_minute(minute)
                .and_then(|t| t.with_second(0))
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(hour);
            let driver = random_profile(format!("user_random_{batch:08x}_{i}"), Role::Owner, rng);
            let offer = RideOffer {
                origin: pick(DEMO_ORIGINS, rng).to_string(),
                destination: pick(DEMO_DESTINATIONS, rng).to_string(),
                departure_time,
                available_seats: rng.gen_range(1..=4),
                price: 0.0,
                event_id: None,
            };
            Ride::publish(
                format!("ride_gen_{batch:08x}_{i}"),
                driver,
                offer,
                distance_miles,
                pricing,
            )
        })
        .collect()
}

/// Recurring requests posted ten minutes apart starting at `now`.
pub fn generate_posted_requests<R: Rng>(
    count: usize,
    now: NaiveDateTime,
    rng: &mut R,
) -> Vec<PostedRequest> {
    let batch: u32 = rng.gen();
    (0..count)
        .map(|i| {
            let poolee = random_profile(format!("user_random_req_{batch:08x}_{i}"), Role::Poolee, rng);
            PostedRequest {
                id: format!("req_gen_{batch:08x}_{i}"),
                poolee,
                origin: pick(DEMO_ORIGINS, rng).to_string(),
                destination: pick(DEMO_DESTINATIONS, rng).to_string(),
                request_type: RequestType::Recurring,
                details: pick(REQUEST_DETAILS, rng).to_string(),
                requested_at: now + Duration::minutes(i as i64 * 10),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{seeded_rng, tuesday_at};
    use std::collections::HashSet;

    #[test]
    fn profiles_are_plausible() {
        let mut rng = seeded_rng(1);
        for profile in driver_pool(20, &mut rng) {
            assert_eq!(profile.role, Role::Owner);
            assert!(profile.email.ends_with("@fiu.edu"));
            let rating = profile.rating.expect("rating");
            assert!((4.5..=5.0).contains(&rating));
            assert_eq!(rating, round_to(rating, 1));
            assert_ne!(profile.preferences.chattiness, Chattiness::NotApplicable);
        }
    }

    #[test]
    fn driver_ids_are_unique() {
        let mut rng = seeded_rng(2);
        let ids: HashSet<_> = driver_pool(10, &mut rng).into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn rides_depart_hourly_on_quarter_hours() {
        let mut rng = seeded_rng(3);
        let now = tuesday_at(9, 7);
        let rides = generate_rides(5, now, &PricingConfig::default(), &mut rng);
        assert_eq!(rides.len(), 5);
        for (i, ride) in rides.iter().enumerate() {
            assert_eq!(ride.departure_time.hour(), 10 + i as u32);
            assert!(QUARTER_HOURS.contains(&ride.departure_time.minute()));
            assert_eq!(ride.departure_time.second(), 0);
            assert!((5.0..=25.0).contains(&ride.distance_miles));
            assert!((1..=4).contains(&ride.available_seats));
            assert!(ride.price > 0.0);
            assert_eq!(ride.co2_saved_kg, PricingConfig::default().co2_saved(ride.distance_miles));
        }
    }

    #[test]
    fn requests_are_ten_minutes_apart() {
        let mut rng = seeded_rng(4);
        let now = tuesday_at(12, 0);
        let requests = generate_posted_requests(3, now, &mut rng);
        let times: Vec<_> = requests.iter().map(|r| r.requested_at).collect();
        assert_eq!(times, vec![now, now + Duration::minutes(10), now + Duration::minutes(20)]);
        assert!(requests
            .iter()
            .all(|r| REQUEST_DETAILS.contains(&r.details.as_str()) && r.poolee.role == Role::Poolee));
    }
}
