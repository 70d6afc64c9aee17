//! Pricing engine: student carpool seat prices, a simulated ride-hailing fare
//! range for comparison, and CO2 saved by sharing the ride.
//!
//! All functions are pure. The departure time is the only time input and it is
//! always supplied by the caller. Distances are in miles.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::traffic::{is_rush_hour, is_weekday};

/// Student seat price: small base to cover the driver's inconvenience.
pub const STUDENT_BASE_FARE: f64 = 1.25;
/// Student seat price per mile: gas and some wear.
pub const STUDENT_PER_MILE_RATE: f64 = 0.30;
/// Student seat price per minute in traffic.
pub const STUDENT_PER_MINUTE_RATE: f64 = 0.04;

pub const RIDESHARE_BASE_FARE: f64 = 2.60;
pub const RIDESHARE_PER_MILE_RATE: f64 = 1.20;
pub const RIDESHARE_PER_MINUTE_RATE: f64 = 0.22;
pub const RIDESHARE_MINIMUM_FARE: f64 = 8.50;

/// ~25 mph.
pub const OFF_PEAK_MINUTES_PER_MILE: f64 = 2.4;
/// ~17 mph.
pub const RUSH_MINUTES_PER_MILE: f64 = 3.5;

/// Surge above this is assumed to come with heavy traffic.
const HEAVY_TRAFFIC_SURGE: f64 = 1.5;

/// Tunable pricing rates. Defaults are calibrated for the Miami-Dade area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub student_base_fare: f64,
    pub student_per_mile_rate: f64,
    pub student_per_minute_rate: f64,
    pub rideshare_base_fare: f64,
    pub rideshare_per_mile_rate: f64,
    pub rideshare_per_minute_rate: f64,
    pub rideshare_minimum_fare: f64,
    pub off_peak_minutes_per_mile: f64,
    pub rush_minutes_per_mile: f64,
    /// High end of the rideshare range relative to the low end.
    pub rideshare_high_factor: f64,
    /// A typical passenger car emits about 404 g of CO2 per mile.
    pub co2_kg_per_mile: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            student_base_fare: STUDENT_BASE_FARE,
            student_per_mile_rate: STUDENT_PER_MILE_RATE,
            student_per_minute_rate: STUDENT_PER_MINUTE_RATE,
            rideshare_base_fare: RIDESHARE_BASE_FARE,
            rideshare_per_mile_rate: RIDESHARE_PER_MILE_RATE,
            rideshare_per_minute_rate: RIDESHARE_PER_MINUTE_RATE,
            rideshare_minimum_fare: RIDESHARE_MINIMUM_FARE,
            off_peak_minutes_per_mile: OFF_PEAK_MINUTES_PER_MILE,
            rush_minutes_per_mile: RUSH_MINUTES_PER_MILE,
            rideshare_high_factor: 1.35,
            co2_kg_per_mile: 0.404,
        }
    }
}

impl PricingConfig {
    /// Price for one seat, rounded to the nearest quarter.
    ///
    /// Formula: `base + miles * per_mile + minutes * per_minute`, where
    /// `minutes = miles * minutes_per_mile` and the slower rush-hour pace
    /// applies to weekday 7–10 and 16–19 departures.
    ///
    /// Non-positive (or NaN) distance prices at 0.
    pub fn ride_price(&self, distance_miles: f64, departure: Option<NaiveDateTime>) -> f64 {
        if distance_miles.is_nan() || distance_miles <= 0.0 {
            return 0.0;
        }
        let minutes_per_mile = match departure {
            Some(departure) if is_rush_hour(departure) => self.rush_minutes_per_mile,
            _ => self.off_peak_minutes_per_mile,
        };
        let estimated_minutes = distance_miles * minutes_per_mile;
        let price = self.student_base_fare
            + distance_miles * self.student_per_mile_rate
            + estimated_minutes * self.student_per_minute_rate;
        round_to_quarter(price)
    }

    /// Simulated ride-hailing fare range for the same trip.
    ///
    /// Negative or NaN distance is treated as zero, which lands on the minimum fare.
    pub fn external_fare(
        &self,
        distance_miles: f64,
        departure: NaiveDateTime,
        origin: &str,
        destination: &str,
    ) -> FareEstimate {
        let distance_miles = distance_miles.max(0.0);
        let surge = SurgeWindow::classify(departure);
        let multiplier = surge.multiplier();
        let zone_fee = zone_fees(origin, destination, departure);

        let minutes_per_mile = if multiplier > HEAVY_TRAFFIC_SURGE {
            self.rush_minutes_per_mile
        } else {
            self.off_peak_minutes_per_mile
        };
        let estimated_minutes = distance_miles * minutes_per_mile;
        let fare_before_surge = self.rideshare_base_fare
            + self.rideshare_per_mile_rate * distance_miles
            + self.rideshare_per_minute_rate * estimated_minutes;

        let fare = (fare_before_surge * multiplier + zone_fee).max(self.rideshare_minimum_fare);
        FareEstimate {
            fare,
            low: fare.round() as u32,
            high: (fare * self.rideshare_high_factor).round() as u32,
            surge,
            zone_fee,
        }
    }

    /// Kilograms of CO2 saved, one decimal.
    pub fn co2_saved(&self, distance_miles: f64) -> f64 {
        round_to(distance_miles.max(0.0) * self.co2_kg_per_mile, 1)
    }
}

/// [`PricingConfig::ride_price`] with default rates.
pub fn calculate_ride_price(distance_miles: f64, departure: Option<NaiveDateTime>) -> f64 {
    PricingConfig::default().ride_price(distance_miles, departure)
}

/// [`PricingConfig::external_fare`] with default rates.
pub fn estimate_external_fare(
    distance_miles: f64,
    departure: NaiveDateTime,
    origin: &str,
    destination: &str,
) -> FareEstimate {
    PricingConfig::default().external_fare(distance_miles, departure, origin, destination)
}

/// [`PricingConfig::co2_saved`] with the default emission rate.
pub fn calculate_co2_saved(distance_miles: f64) -> f64 {
    PricingConfig::default().co2_saved(distance_miles)
}

fn round_to_quarter(value: f64) -> f64 {
    round_to((value * 4.0).round() / 4.0, 2)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

// ---------------------------------------------------------------------------
// Surge windows
// ---------------------------------------------------------------------------

/// Time-of-week buckets for the simulated surge multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurgeWindow {
    /// Weekday 7:00–9:59.
    MorningRush,
    /// Weekday 16:00–18:59.
    EveningRush,
    /// Weekday 1:00–4:59.
    LateNight,
    /// Weekday 19:00–21:59.
    PostWork,
    /// Saturday before 3:00 or from 19:00, Sunday before 3:00.
    WeekendNightlife,
    /// Other weekend hours 12:00–17:59.
    WeekendAfternoon,
    Standard,
}

impl SurgeWindow {
    pub fn classify(departure: NaiveDateTime) -> Self {
        let hour = departure.hour();
        let day = departure.weekday();
        if is_weekday(day) {
            return match hour {
                7..=9 => SurgeWindow::MorningRush,
                16..=18 => SurgeWindow::EveningRush,
                1..=4 => SurgeWindow::LateNight,
                19..=21 => SurgeWindow::PostWork,
                _ => SurgeWindow::Standard,
            };
        }
        let nightlife = match day {
            Weekday::Sat => hour < 3 || hour >= 19,
            Weekday::Sun => hour < 3,
            _ => false,
        };
        if nightlife {
            SurgeWindow::WeekendNightlife
        } else if (12..18).contains(&hour) {
            SurgeWindow::WeekendAfternoon
        } else {
            SurgeWindow::Standard
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            SurgeWindow::MorningRush => 1.6,
            SurgeWindow::EveningRush => 1.8,
            SurgeWindow::LateNight => 1.2,
            SurgeWindow::PostWork => 1.1,
            SurgeWindow::WeekendNightlife => 2.2,
            SurgeWindow::WeekendAfternoon => 1.15,
            SurgeWindow::Standard => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Zone fees
// ---------------------------------------------------------------------------

struct ZoneSurcharge {
    keywords: &'static [&'static str],
    fee: f64,
    /// Venue fee: only on weekday evenings (after 17:59) and weekends.
    events_only: bool,
}

const ZONE_SURCHARGES: &[ZoneSurcharge] = &[
    ZoneSurcharge {
        keywords: &["airport"],
        fee: 3.50,
        events_only: false,
    },
    ZoneSurcharge {
        keywords: &["south beach", "port of miami"],
        fee: 5.50,
        events_only: false,
    },
    ZoneSurcharge {
        keywords: &["brickell", "wynwood"],
        fee: 4.00,
        events_only: false,
    },
    ZoneSurcharge {
        keywords: &["hard rock stadium", "kaseya center"],
        fee: 6.00,
        events_only: true,
    },
];

/// Flat high-demand fees for a trip. Each tier counts once, whichever end of
/// the trip mentions it.
pub fn zone_fees(origin: &str, destination: &str, departure: NaiveDateTime) -> f64 {
    let locations = format!("{} {}", origin.to_lowercase(), destination.to_lowercase());
    let event_time = !is_weekday(departure.weekday()) || departure.hour() > 17;
    ZONE_SURCHARGES
        .iter()
        .filter(|zone| !zone.events_only || event_time)
        .filter(|zone| zone.keywords.iter().any(|k| locations.contains(k)))
        .map(|zone| zone.fee)
        .sum()
}

// ---------------------------------------------------------------------------
// Fare estimate
// ---------------------------------------------------------------------------

/// Simulated ride-hailing fare range. Renders as `~$LOW-HIGH`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FareEstimate {
    /// Unrounded fare after surge, zone fees and the minimum-fare floor.
    pub fare: f64,
    pub low: u32,
    pub high: u32,
    pub surge: SurgeWindow,
    pub zone_fee: f64,
}

impl fmt::Display for FareEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~${}-{}", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
