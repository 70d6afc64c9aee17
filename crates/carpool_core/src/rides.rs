//! Ride listings offered by drivers and ride requests posted by riders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dispatch::RideSlots;
use crate::pricing::{FareEstimate, PricingConfig};
use crate::profile::UserProfile;
use crate::request::RequestType;

/// What a driver fills in when offering a ride.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideOffer {
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub available_seats: u8,
    /// Asking price per seat; 0 means "price it for me".
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub event_id: Option<String>,
}

/// A published ride with its computed price, CO2 figure and rideshare comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: String,
    pub driver: UserProfile,
    pub origin: String,
    pub destination: String,
    pub departure_time: NaiveDateTime,
    pub available_seats: u8,
    pub price: f64,
    pub co2_saved_kg: f64,
    pub distance_miles: f64,
    pub external_estimate: FareEstimate,
    #[serde(default)]
    pub event_id: Option<String>,
}

impl Ride {
    /// Turn an offer into a listing. A positive asking price is kept as is;
    /// otherwise the seat is priced from the distance and departure time.
    pub fn publish(
        id: impl Into<String>,
        driver: UserProfile,
        offer: RideOffer,
        distance_miles: f64,
        pricing: &PricingConfig,
    ) -> Self {
        let price = if offer.price > 0.0 {
            offer.price
        } else {
            pricing.ride_price(distance_miles, Some(offer.departure_time))
        };
        let external_estimate = pricing.external_fare(
            distance_miles,
            offer.departure_time,
            &offer.origin,
            &offer.destination,
        );
        Self {
            id: id.into(),
            driver,
            price,
            co2_saved_kg: pricing.co2_saved(distance_miles),
            distance_miles,
            external_estimate,
            origin: offer.origin,
            destination: offer.destination,
            departure_time: offer.departure_time,
            available_seats: offer.available_seats,
            event_id: offer.event_id,
        }
    }
}

/// A public request a rider posts when no ride fits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostedRequest {
    pub id: String,
    pub poolee: UserProfile,
    pub origin: String,
    pub destination: String,
    pub request_type: RequestType,
    pub details: String,
    pub requested_at: NaiveDateTime,
}

impl PostedRequest {
    /// Build from classifier slots as a recurring request.
    pub fn from_slots(
        id: impl Into<String>,
        poolee: UserProfile,
        slots: &RideSlots,
        requested_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            poolee,
            origin: slots.origin.clone(),
            destination: slots.destination.clone(),
            request_type: RequestType::Recurring,
            details: slots.details.clone(),
            requested_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_profile, tuesday_at};
    use crate::profile::Role;

    fn offer(price: f64) -> RideOffer {
        RideOffer {
            origin: "Brickell, Miami".into(),
            destination: "FIU MMC Campus".into(),
            departure_time: tuesday_at(8, 0),
            available_seats: 3,
            price,
            event_id: None,
        }
    }

    #[test]
    fn zero_asking_price_is_computed() {
        let pricing = PricingConfig::default();
        let ride = Ride::publish("ride_1", sample_profile("d", Role::Owner), offer(0.0), 10.0, &pricing);
        assert_eq!(ride.price, 5.75);
        assert_eq!(ride.co2_saved_kg, 4.0);
        assert_eq!(ride.external_estimate.zone_fee, 4.0);
    }

    #[test]
    fn positive_asking_price_is_kept() {
        let pricing = PricingConfig::default();
        let ride = Ride::publish("ride_2", sample_profile("d", Role::Owner), offer(4.5), 10.0, &pricing);
        assert_eq!(ride.price, 4.5);
    }

    #[test]
    fn posted_request_copies_slots() {
        let slots = RideSlots {
            origin: "Doral, FL".into(),
            destination: "FIU Green Library".into(),
            details: "quiet ride please".into(),
        };
        let request = PostedRequest::from_slots(
            "req_1",
            sample_profile("p", Role::Poolee),
            &slots,
            tuesday_at(9, 30),
        );
        assert_eq!(request.origin, "Doral, FL");
        assert_eq!(request.request_type, RequestType::Recurring);
        assert_eq!(request.details, "quiet ride please");
    }
}
