//! Assembles the fixed pool of driver routes: every main route, plus each
//! feeder spliced onto the tail of the first main route that passes through
//! its merge point.

use log::debug;
use serde::Serialize;

use super::config::{FeederSpec, MainRouteSpec};
use super::route::Route;

/// A route in the driver pool, with where it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComposedRoute {
    pub name: String,
    pub route: Route,
    /// Main route the feeder was spliced onto; `None` for main routes.
    pub parent: Option<String>,
    pub merge_point: Option<String>,
}

pub(crate) fn compose_routes(main_routes: &[MainRouteSpec], feeders: &[FeederSpec]) -> Vec<ComposedRoute> {
    let mut composed: Vec<ComposedRoute> = main_routes
        .iter()
        .map(|main| ComposedRoute {
            name: main.name.clone(),
            route: Route::new(main.waypoints.clone()),
            parent: None,
            merge_point: None,
        })
        .collect();

    for feeder in feeders {
        let parent = main_routes.iter().find_map(|main| {
            main.waypoints
                .iter()
                .position(|w| *w == feeder.merge_point)
                .map(|idx| (main, idx))
        });
        let Some((main, merge_idx)) = parent else {
            debug!(
                "dropping feeder `{}`: merge point `{}` is on no main route",
                feeder.name, feeder.merge_point
            );
            continue;
        };

        // The feeder ends on the merge point; the main route supplies it.
        let feeder_len = feeder.waypoints.len().saturating_sub(1);
        let mut waypoints = feeder.waypoints[..feeder_len].to_vec();
        waypoints.extend_from_slice(&main.waypoints[merge_idx..]);

        composed.push(ComposedRoute {
            name: format!("{}+{}", feeder.name, main.name),
            route: Route::new(waypoints),
            parent: Some(main.name.clone()),
            merge_point: Some(feeder.merge_point.clone()),
        });
    }

    composed
}
