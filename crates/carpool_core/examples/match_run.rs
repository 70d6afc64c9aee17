//! Match a Kendall rider against a generated driver pool and print the ranking.
//!
//! Run with: cargo run -p carpool_core --example match_run

use std::sync::Arc;

use carpool_core::generators::generate_rides;
use carpool_core::matching::{MatcherConfig, RouteMatcher};
use carpool_core::network::RoadNetwork;
use carpool_core::pricing::PricingConfig;
use carpool_core::request::RideRequest;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    const POOL_SIZE: usize = 8;
    const SEED: u64 = 123;

    let network = Arc::new(RoadNetwork::miami_fiu()?);
    let pricing = PricingConfig::default();
    let matcher = RouteMatcher::new(network, MatcherConfig::default(), &pricing);
    let request = RideRequest::new("Kendall, FL", "FIU Engineering Center, Miami, FL")
        .with_arrive_by("08:00")
        .with_event_date("2025-01-14");

    let mut rng = StdRng::seed_from_u64(SEED);
    let candidates = matcher.match_riders(&request, POOL_SIZE, &mut rng);

    println!(
        "--- {} -> {} (arrive by 08:00, {} drivers, seed {}) ---",
        request.origin, request.destination, POOL_SIZE, SEED
    );
    for candidate in &candidates {
        println!(
            "{:>3}%  {:<24} from {:<45} original {:>3} min  combined {:>3} min  ${:.2}",
            candidate.route_overlap_percentage,
            candidate.driver.name,
            candidate.route_origin().unwrap_or("?"),
            candidate.driver_original_duration_minutes,
            candidate.driver_combined_duration_minutes,
            candidate.estimated_cost,
        );
    }

    let now = NaiveDate::from_ymd_opt(2025, 1, 14)
        .and_then(|d| d.and_hms_opt(6, 0, 0))
        .ok_or("invalid demo time")?;
    println!("--- Listings ---");
    for ride in generate_rides(3, now, &pricing, &mut rng) {
        println!(
            "{} -> {} at {}  ${:.2}  (rideshare {})  CO2 saved {} kg",
            ride.origin,
            ride.destination,
            ride.departure_time.format("%H:%M"),
            ride.price,
            ride.external_estimate,
            ride.co2_saved_kg
        );
    }
    Ok(())
}
