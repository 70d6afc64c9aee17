//! Rider request input, as handed over by the UI or the intent classifier.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;
use crate::traffic::{classify_traffic_regime, TrafficRegime};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestType {
    /// A regular commute on a weekly schedule.
    #[default]
    #[serde(alias = "Regular Basis")]
    Recurring,
    /// A one-off trip to an event.
    #[serde(alias = "Event Based")]
    Event,
}

/// What a rider asks for. Times are free text (`"HH:MM"`) as collaborators send
/// them; malformed times are logged and treated as absent, never rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequest {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub request_type: RequestType,
    #[serde(default)]
    pub arrive_by: Option<String>,
    #[serde(default)]
    pub leave_at: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl RideRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Default::default()
        }
    }

    pub fn with_request_type(mut self, request_type: RequestType) -> Self {
        self.request_type = request_type;
        self
    }

    pub fn with_arrive_by(mut self, time: impl Into<String>) -> Self {
        self.arrive_by = Some(time.into());
        self
    }

    pub fn with_leave_at(mut self, time: impl Into<String>) -> Self {
        self.leave_at = Some(time.into());
        self
    }

    pub fn with_event_date(mut self, date: impl Into<String>) -> Self {
        self.event_date = Some(date.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn arrive_by_time(&self) -> Option<TimeOfDay> {
        parse_lenient("arriveBy", self.arrive_by.as_deref())
    }

    pub fn leave_at_time(&self) -> Option<TimeOfDay> {
        parse_lenient("leaveAt", self.leave_at.as_deref())
    }

    pub fn event_day(&self) -> Option<NaiveDate> {
        let raw = self.event_date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(err) => {
                warn!("ignoring eventDate `{raw}`: {err}");
                None
            }
        }
    }

    /// Regime from the arrival hour, else the departure hour, else off-peak.
    pub fn traffic_regime(&self) -> TrafficRegime {
        self.arrive_by_time()
            .or_else(|| self.leave_at_time())
            .map(|t| classify_traffic_regime(t.hour))
            .unwrap_or_default()
    }

    /// Concrete departure time, available only for dated requests: `leaveAt`
    /// on the event date, or `arriveBy` minus the trip duration.
    pub fn departure_time(&self, trip_minutes: u32) -> Option<NaiveDateTime> {
        let date = self.event_day()?;
        if let Some(leave_at) = self.leave_at_time() {
            return Some(leave_at.on(date));
        }
        let arrive_by = self.arrive_by_time()?;
        Some(arrive_by.on(date) - Duration::minutes(i64::from(trip_minutes)))
    }
}

fn parse_lenient(field: &str, raw: Option<&str>) -> Option<TimeOfDay> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(time) => Some(time),
        Err(err) => {
            warn!("ignoring {field}: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_follows_arrival_then_departure() {
        let request = RideRequest::new("Kendall, FL", "FIU");
        assert_eq!(request.traffic_regime(), TrafficRegime::OffPeak);
        assert_eq!(
            request.clone().with_arrive_by("08:00").traffic_regime(),
            TrafficRegime::Peak
        );
        assert_eq!(
            request.clone().with_arrive_by("10:00").traffic_regime(),
            TrafficRegime::OffPeak
        );
        assert_eq!(
            request.clone().with_leave_at("07:15").traffic_regime(),
            TrafficRegime::Peak
        );
        // Arrival wins when both are present.
        assert_eq!(
            request
                .with_arrive_by("12:00")
                .with_leave_at("07:15")
                .traffic_regime(),
            TrafficRegime::OffPeak
        );
    }

    #[test]
    fn malformed_or_blank_times_are_ignored() {
        let request = RideRequest::new("Kendall", "FIU").with_arrive_by("soon");
        assert_eq!(request.arrive_by_time(), None);
        assert_eq!(request.traffic_regime(), TrafficRegime::OffPeak);
        let request = RideRequest::new("Kendall", "FIU").with_arrive_by("");
        assert_eq!(request.arrive_by_time(), None);
    }

    #[test]
    fn bare_arrival_hour_sets_the_regime() {
        let request = RideRequest::new("Kendall", "FIU").with_arrive_by("8");
        assert_eq!(request.traffic_regime(), TrafficRegime::Peak);
    }

    #[test]
    fn departure_needs_a_date() {
        let request = RideRequest::new("Kendall", "FIU").with_arrive_by("08:00");
        assert_eq!(request.departure_time(20), None);

        let dated = request.with_event_date("2025-01-14");
        let departure = dated.departure_time(20).expect("dated departure");
        assert_eq!(departure.to_string(), "2025-01-14 07:40:00");

        let leaving = dated.with_leave_at("07:00");
        let departure = leaving.departure_time(20).expect("leave-at departure");
        assert_eq!(departure.to_string(), "2025-01-14 07:00:00");
    }

    #[test]
    fn deserializes_collaborator_payload() {
        let request: RideRequest = serde_json::from_str(
            r#"{
                "origin": "Kendall, FL",
                "destination": "FIU Engineering Center, Miami, FL",
                "requestType": "Regular Basis",
                "arriveBy": "08:00"
            }"#,
        )
        .expect("payload parses");
        assert_eq!(request.request_type, RequestType::Recurring);
        assert_eq!(request.arrive_by.as_deref(), Some("08:00"));
        assert_eq!(request.leave_at, None);
    }
}
