//! Suffix-alignment overlap between a rider's route and a driver's route.
//!
//! Both routes end at the same destination, so the shared part is found by
//! walking back from the destination while waypoints agree. This is a
//! deliberately simple heuristic over the synthetic network, not a path search.

use std::ops::RangeInclusive;

use crate::network::Route;

/// Result of aligning a driver's route against a rider's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Trailing waypoints the two routes have in common.
    pub shared_waypoints: usize,
    pub overlap_percent: u8,
    /// Driver's route from its origin up to and including the merge waypoint.
    pub driver_unshared: Route,
}

/// Bounds given in reverse order are swapped rather than rejected.
pub fn path_match(rider: &Route, driver: &Route, bounds: RangeInclusive<u8>) -> PathMatch {
    let (start, end) = (*bounds.start(), *bounds.end());
    let (min, max) = (start.min(end), start.max(end));
    if rider.len() < 2 || driver.len() < 2 {
        return PathMatch {
            shared_waypoints: 0,
            overlap_percent: min,
            driver_unshared: driver.clone(),
        };
    }

    let shared_waypoints = rider
        .waypoints()
        .iter()
        .rev()
        .zip(driver.waypoints().iter().rev())
        .take_while(|(r, d)| r == d)
        .count();
    let shared_segments = shared_waypoints.saturating_sub(1);
    let raw_percent = shared_segments as f64 / driver.segment_count() as f64 * 100.0;
    let overlap_percent = raw_percent.round().clamp(f64::from(min), f64::from(max)) as u8;

    let merge_idx = driver.len() - shared_waypoints;
    let end = (merge_idx + 1).min(driver.len());
    let driver_unshared = Route::new(driver.waypoints()[..end].to_vec());

    PathMatch {
        shared_waypoints,
        overlap_percent,
        driver_unshared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: RangeInclusive<u8> = 40..=98;

    fn route(items: &[&str]) -> Route {
        Route::from(items)
    }

    #[test]
    fn shared_tail_and_unshared_prefix() {
        let rider = route(&["home", "B", "C", "HUB"]);
        let driver = route(&["X", "Y", "B", "C", "HUB"]);
        let m = path_match(&rider, &driver, BOUNDS);
        assert_eq!(m.shared_waypoints, 3);
        // 2 of 4 driver segments.
        assert_eq!(m.overlap_percent, 50);
        assert_eq!(m.driver_unshared.waypoints(), &["X", "Y", "B"]);
    }

    #[test]
    fn destination_only_overlap_clamps_up() {
        let rider = route(&["home", "B", "HUB"]);
        let driver = route(&["X", "Y", "HUB"]);
        let m = path_match(&rider, &driver, BOUNDS);
        assert_eq!(m.shared_waypoints, 1);
        assert_eq!(m.overlap_percent, 40);
        assert_eq!(m.driver_unshared, driver);
    }

    #[test]
    fn identical_routes_clamp_down() {
        let rider = route(&["A", "B", "HUB"]);
        let m = path_match(&rider, &rider.clone(), BOUNDS);
        assert_eq!(m.overlap_percent, 98);
        assert_eq!(m.driver_unshared.waypoints(), &["A"]);
    }

    #[test]
    fn no_common_tail_keeps_whole_driver_route() {
        let rider = route(&["A", "HUB"]);
        let driver = route(&["X", "ELSEWHERE"]);
        let m = path_match(&rider, &driver, BOUNDS);
        assert_eq!(m.shared_waypoints, 0);
        assert_eq!(m.overlap_percent, 40);
        assert_eq!(m.driver_unshared, driver);
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let rider = route(&["A", "B", "HUB"]);
        let m = path_match(&rider, &rider.clone(), 98..=40);
        assert_eq!(m.overlap_percent, 98);
        let m = path_match(&route(&["A", "HUB"]), &route(&["X", "HUB"]), 98..=40);
        assert_eq!(m.overlap_percent, 40);
    }

    #[test]
    fn degenerate_routes_take_lower_bound() {
        let m = path_match(&route(&["HUB"]), &route(&["X", "HUB"]), BOUNDS);
        assert_eq!(m.overlap_percent, 40);
    }
}
