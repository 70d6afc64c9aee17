use serde::{Deserialize, Serialize};

use crate::network::Route;
use crate::profile::UserProfile;

/// One driver's routed, priced offer against a rider's request.
///
/// Candidates are rebuilt for every match call and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    pub id: String,
    pub driver: UserProfile,
    pub route: Route,
    /// Shared trailing path with the rider, clamped to the plausible band.
    pub route_overlap_percentage: u8,
    /// Driver's own trip, no detour.
    pub driver_original_duration_minutes: u32,
    /// Driver's path up to where it joins the rider's route.
    pub driver_approach_duration_minutes: u32,
    /// Approach + rider's trip + pickup/dropoff buffer.
    pub driver_combined_duration_minutes: u32,
    pub estimated_cost: f64,
}

impl MatchCandidate {
    pub fn route_origin(&self) -> Option<&str> {
        self.route.origin()
    }

    pub fn route_destination(&self) -> Option<&str> {
        self.route.destination()
    }

    /// Extra minutes the detour adds to the driver's day. Zero when the
    /// approximation comes out shorter than the original trip.
    pub fn detour_minutes(&self) -> u32 {
        self.driver_combined_duration_minutes
            .saturating_sub(self.driver_original_duration_minutes)
    }
}

/// Order by overlap, highest first. The sort is stable, so equal overlaps keep
/// their generation order.
pub fn rank_candidates(candidates: &mut [MatchCandidate]) {
    candidates.sort_by(|a, b| b.route_overlap_percentage.cmp(&a.route_overlap_percentage));
}
