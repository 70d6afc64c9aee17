//! Traffic model: a binary peak/off-peak regime for route durations, and
//! weekday rush-hour windows for pricing.
//!
//! The regime scales segment durations on the road network; the rush-hour
//! windows slow the assumed travel speed used by the pricing engine. Both are
//! pure functions of the clock, with no live traffic input.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Route-duration regime
// ---------------------------------------------------------------------------

/// Morning commute window used for route durations: `[7, 10)`.
pub const PEAK_START_HOUR: u32 = 7;
pub const PEAK_END_HOUR: u32 = 10;

/// Traffic regime applied to every segment of a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrafficRegime {
    Peak,
    #[default]
    OffPeak,
}

impl TrafficRegime {
    /// Multiplier for a single segment duration under this regime.
    pub fn segment_factor(self, peak_multiplier: f64) -> f64 {
        match self {
            TrafficRegime::Peak => peak_multiplier,
            TrafficRegime::OffPeak => 1.0,
        }
    }
}

/// Classify an hour of the day (0–23). Only the morning window counts as peak.
pub fn classify_traffic_regime(hour: u32) -> TrafficRegime {
    if (PEAK_START_HOUR..PEAK_END_HOUR).contains(&hour) {
        TrafficRegime::Peak
    } else {
        TrafficRegime::OffPeak
    }
}

// ---------------------------------------------------------------------------
// Pricing rush hours
// ---------------------------------------------------------------------------

/// Monday to Friday.
pub fn is_weekday(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Weekday morning `[7, 10)` or evening `[16, 19)` departure.
pub fn is_rush_hour(departure: NaiveDateTime) -> bool {
    let hour = departure.hour();
    is_weekday(departure.weekday()) && ((7..10).contains(&hour) || (16..19).contains(&hour))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(hour, 0, 0))
            .expect("valid datetime")
    }

    #[test]
    fn peak_window_is_half_open() {
        assert_eq!(classify_traffic_regime(6), TrafficRegime::OffPeak);
        assert_eq!(classify_traffic_regime(7), TrafficRegime::Peak);
        assert_eq!(classify_traffic_regime(9), TrafficRegime::Peak);
        assert_eq!(classify_traffic_regime(10), TrafficRegime::OffPeak);
        // Evening does not count for route durations.
        assert_eq!(classify_traffic_regime(17), TrafficRegime::OffPeak);
    }

    #[test]
    fn segment_factor_only_scales_peak() {
        assert_eq!(TrafficRegime::Peak.segment_factor(1.4), 1.4);
        assert_eq!(TrafficRegime::OffPeak.segment_factor(1.4), 1.0);
    }

    #[test]
    fn rush_hour_needs_weekday() {
        // 2025-01-14 is a Tuesday, 2025-01-18 a Saturday.
        assert!(is_rush_hour(at(2025, 1, 14, 8)));
        assert!(is_rush_hour(at(2025, 1, 14, 18)));
        assert!(!is_rush_hour(at(2025, 1, 14, 14)));
        assert!(!is_rush_hour(at(2025, 1, 14, 19)));
        assert!(!is_rush_hour(at(2025, 1, 18, 8)));
    }
}
