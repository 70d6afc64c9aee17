use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use carpool_core::generators::{generate_posted_requests, generate_rides};
use carpool_core::{EngineConfig, MatchCandidate, RideRequest, RoadNetwork, RouteMatcher};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "carpool",
    about = "Route matching and pricing for student carpools",
    long_about = "Match riders to drivers over a synthetic road network, price seats,\n\
                  and compare against a simulated ride-hailing fare."
)]
struct Cli {
    /// Road network JSON file (defaults to the bundled Miami/FIU network)
    #[arg(long, global = true, env = "CARPOOL_NETWORK")]
    network: Option<PathBuf>,
    /// Engine config JSON file (defaults to built-in rates)
    #[arg(long, global = true, env = "CARPOOL_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate drivers for one ride request
    Match {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        /// Desired arrival time, HH:MM
        #[arg(long)]
        arrive_by: Option<String>,
        /// Desired departure time, HH:MM
        #[arg(long)]
        leave_at: Option<String>,
        /// YYYY-MM-DD, enables time-aware pricing
        #[arg(long)]
        event_date: Option<String>,
        /// Drivers to generate (defaults to the configured candidate count)
        #[arg(long)]
        count: Option<usize>,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Student seat price for a trip
    Price {
        #[arg(long, allow_negative_numbers = true)]
        distance: f64,
        /// Departure, YYYY-MM-DDTHH:MM
        #[arg(long, value_parser = parse_departure)]
        at: Option<NaiveDateTime>,
    },
    /// Simulated ride-hailing fare range for a trip
    Estimate {
        #[arg(long, allow_negative_numbers = true)]
        distance: f64,
        /// Departure, YYYY-MM-DDTHH:MM (defaults to now)
        #[arg(long, value_parser = parse_departure)]
        at: Option<NaiveDateTime>,
        #[arg(long, default_value = "")]
        origin: String,
        #[arg(long, default_value = "")]
        destination: String,
    },
    /// Kilograms of CO2 saved by sharing a trip
    Co2 {
        #[arg(long, allow_negative_numbers = true)]
        distance: f64,
    },
    /// Generate demo ride listings and posted requests
    Demo {
        #[arg(long, default_value_t = 5)]
        rides: usize,
        #[arg(long, default_value_t = 3)]
        requests: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Match a JSON array of ride requests in parallel
    Batch {
        /// File holding `[RideRequest, ...]`
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        count: Option<usize>,
        /// Base seed; request `i` uses `seed + i`
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn parse_departure(raw: &str) -> Result<NaiveDateTime, String> {
    ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| format!("expected YYYY-MM-DDTHH:MM, got `{raw}`"))
}

// ── Output shapes ──────────────────────────────────────────────────

#[derive(Serialize)]
struct PriceReport {
    distance_miles: f64,
    departure: Option<NaiveDateTime>,
    price: f64,
}

#[derive(Serialize)]
struct EstimateReport {
    distance_miles: f64,
    departure: NaiveDateTime,
    range: String,
    #[serde(flatten)]
    estimate: carpool_core::FareEstimate,
}

#[derive(Serialize)]
struct BatchResult {
    index: usize,
    origin: String,
    destination: String,
    candidates: Vec<MatchCandidate>,
}

// ── Commands ───────────────────────────────────────────────────────

fn load_network(path: Option<&Path>) -> Result<Arc<RoadNetwork>> {
    let network = match path {
        Some(path) => RoadNetwork::from_path(path)
            .with_context(|| format!("loading network from {}", path.display()))?,
        None => RoadNetwork::miami_fiu().context("loading bundled network")?,
    };
    info!(
        "network `{}`: {} main routes, {} composed routes",
        network.name(),
        network.main_routes().len(),
        network.composed_routes().len()
    );
    Ok(Arc::new(network))
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_path(path)
                .with_context(|| format!("loading engine config from {}", path.display()))?;
            info!("engine config loaded from {}", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_match(cli: &Cli, config: &EngineConfig, request: RideRequest, count: Option<usize>, seed: u64) -> Result<()> {
    let network = load_network(cli.network.as_deref())?;
    let matcher = RouteMatcher::new(network, config.matcher.clone(), &config.pricing);
    let count = count.unwrap_or(config.matcher.candidate_count);
    let mut rng = StdRng::seed_from_u64(seed);
    let candidates = matcher.match_riders(&request, count, &mut rng);
    info!(
        "{} candidates for {} -> {}",
        candidates.len(),
        request.origin,
        request.destination
    );
    print_json(&candidates)
}

fn run_batch(cli: &Cli, config: &EngineConfig, input: &Path, count: Option<usize>, seed: u64) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("reading requests from {}", input.display()))?;
    let requests: Vec<RideRequest> =
        serde_json::from_str(&json).with_context(|| format!("parsing requests in {}", input.display()))?;
    if requests.is_empty() {
        bail!("{} contains no requests", input.display());
    }

    let network = load_network(cli.network.as_deref())?;
    let matcher = RouteMatcher::new(network, config.matcher.clone(), &config.pricing);
    let count = count.unwrap_or(config.matcher.candidate_count);
    info!("matching {} requests", requests.len());

    let results: Vec<BatchResult> = requests
        .into_par_iter()
        .enumerate()
        .map(|(index, request)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            let candidates = matcher.match_riders(&request, count, &mut rng);
            BatchResult {
                index,
                origin: request.origin,
                destination: request.destination,
                candidates,
            }
        })
        .collect();
    print_json(&results)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let pricing = &config.pricing;

    match &cli.command {
        Commands::Match {
            origin,
            destination,
            arrive_by,
            leave_at,
            event_date,
            count,
            seed,
        } => {
            let mut request = RideRequest::new(origin.as_str(), destination.as_str());
            request.arrive_by = arrive_by.clone();
            request.leave_at = leave_at.clone();
            request.event_date = event_date.clone();
            run_match(&cli, &config, request, *count, *seed)
        }
        Commands::Price { distance, at } => print_json(&PriceReport {
            distance_miles: *distance,
            departure: *at,
            price: pricing.ride_price(*distance, *at),
        }),
        Commands::Estimate {
            distance,
            at,
            origin,
            destination,
        } => {
            let departure = at.unwrap_or_else(|| Local::now().naive_local());
            let estimate = pricing.external_fare(*distance, departure, origin, destination);
            print_json(&EstimateReport {
                distance_miles: *distance,
                departure,
                range: estimate.to_string(),
                estimate,
            })
        }
        Commands::Co2 { distance } => print_json(&serde_json::json!({
            "distance_miles": distance,
            "co2_saved_kg": pricing.co2_saved(*distance),
        })),
        Commands::Demo {
            rides,
            requests,
            seed,
        } => {
            let now = Local::now().naive_local();
            let mut rng = StdRng::seed_from_u64(*seed);
            let rides = generate_rides(*rides, now, pricing, &mut rng);
            let requests = generate_posted_requests(*requests, now, &mut rng);
            info!("generated {} rides and {} requests", rides.len(), requests.len());
            print_json(&serde_json::json!({ "rides": rides, "requests": requests }))
        }
        Commands::Batch { input, count, seed } => run_batch(&cli, &config, input, *count, *seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn departure_accepts_t_and_space_separators() {
        let a = parse_departure("2025-01-14T08:00").expect("T form");
        let b = parse_departure("2025-01-14 08:00").expect("space form");
        assert_eq!(a, b);
        assert!(parse_departure("tomorrow").is_err());
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "carpool", "price", "--distance", "10", "--config", "engine.json",
        ])
        .expect("parses");
        assert_eq!(cli.config.as_deref(), Some(Path::new("engine.json")));
        assert!(matches!(cli.command, Commands::Price { distance, at: None } if distance == 10.0));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "matcher": {{ "candidate_count": 7 }} }}"#).expect("write");
        let config = load_config(Some(file.path())).expect("loads");
        assert_eq!(config.matcher.candidate_count, 7);
    }

    #[test]
    fn missing_network_file_reports_path() {
        let err = load_network(Some(Path::new("/no/such/network.json"))).expect_err("missing");
        assert!(format!("{err:#}").contains("/no/such/network.json"));
    }
}
