//! Wall-clock time-of-day values as riders enter them (`"08:00"`, `"17:30"`).

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::TimeParseError;

/// Hour and minute of a day, 24-hour clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    /// Combine with a calendar date.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        // Range is checked in `new`/`from_str`, so this never falls back in practice.
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN);
        date.and_time(time)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // A bare hour ("8") means on the hour.
        let (hour, minute) = trimmed.split_once(':').unwrap_or((trimmed, "0"));
        let hour: u32 = hour
            .parse()
            .map_err(|_| TimeParseError::Format(s.to_string()))?;
        let minute: u32 = minute
            .parse()
            .map_err(|_| TimeParseError::Format(s.to_string()))?;
        Self::new(hour, minute).ok_or_else(|| TimeParseError::OutOfRange(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
