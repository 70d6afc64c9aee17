//! Turns the intent classifier's structured output into an action.
//!
//! The classifier itself lives outside this crate. It hands over an intent
//! and, for ride intents, the origin/destination/details slots it extracted.
//! This module only decides what to do with them: connect the rider to the
//! best listed ride, post a public request, or treat the message as a general
//! question.

use serde::{Deserialize, Serialize};

use crate::profile::{Role, UserProfile};
use crate::rides::Ride;

/// Score a ride needs before it is offered to the rider.
pub const MIN_MATCH_SCORE: u32 = 5;

const DESTINATION_SCORE: u32 = 5;
const EVENT_SCORE: u32 = 3;
const CHATTINESS_SCORE: u32 = 1;

/// Slots extracted from a ride message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideSlots {
    pub origin: String,
    pub destination: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "kebab-case")]
pub enum AssistantIntent {
    FindRide(RideSlots),
    CreateRequest(RideSlots),
    GeneralQuery,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum AssistantAction {
    /// Open a chat with this ride's driver.
    InitiateChat { ride: Ride },
    /// Post a public request built from these slots.
    CreateRideRequest { slots: RideSlots },
    GeneralQuery,
}

pub fn dispatch(intent: &AssistantIntent, rides: &[Ride], current_user: &UserProfile) -> AssistantAction {
    match intent {
        AssistantIntent::FindRide(slots) => match find_best_ride(rides, slots, current_user) {
            Some(ride) => AssistantAction::InitiateChat { ride: ride.clone() },
            None => AssistantAction::CreateRideRequest {
                slots: slots.clone(),
            },
        },
        AssistantIntent::CreateRequest(slots) => AssistantAction::CreateRideRequest {
            slots: slots.clone(),
        },
        AssistantIntent::GeneralQuery => AssistantAction::GeneralQuery,
    }
}

/// Highest-scoring ride that is not the rider's own and not an organisation's,
/// if it clears [`MIN_MATCH_SCORE`]. Earlier rides win ties.
pub fn find_best_ride<'a>(
    rides: &'a [Ride],
    slots: &RideSlots,
    current_user: &UserProfile,
) -> Option<&'a Ride> {
    let destination = slots.destination.to_lowercase();
    let details = slots.details.to_lowercase();

    let mut best: Option<(&Ride, u32)> = None;
    for ride in rides
        .iter()
        .filter(|ride| ride.driver.id != current_user.id && ride.driver.role != Role::Organization)
    {
        let score = score_ride(ride, &destination, &details);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((ride, score));
        }
    }
    best.filter(|(_, score)| *score >= MIN_MATCH_SCORE)
        .map(|(ride, _)| ride)
}

fn score_ride(ride: &Ride, destination: &str, details: &str) -> u32 {
    let mut score = 0;
    let ride_destination = ride.destination.to_lowercase();
    if ride_destination.contains(destination) || destination.contains(ride_destination.as_str()) {
        score += DESTINATION_SCORE;
    }
    if ride.event_id.is_some() && details.contains("event") {
        score += EVENT_SCORE;
    }
    let chattiness = ride.driver.preferences.chattiness.as_str().to_lowercase();
    if details.contains(chattiness.as_str()) {
        score += CHATTINESS_SCORE;
    }
    score
}
