use serde::{Deserialize, Serialize};

/// An ordered list of waypoint labels, origin first and destination last.
///
/// Waypoints are opaque strings compared by exact match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    waypoints: Vec<String>,
}

impl Route {
    pub fn new(waypoints: Vec<String>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[String] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn origin(&self) -> Option<&str> {
        self.waypoints.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.waypoints.last().map(String::as_str)
    }

    /// Number of consecutive waypoint pairs.
    pub fn segment_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    pub fn position(&self, waypoint: &str) -> Option<usize> {
        self.waypoints.iter().position(|w| w == waypoint)
    }

    /// Waypoints from `waypoint` (inclusive) to the destination.
    pub fn suffix_from(&self, waypoint: &str) -> Option<&[String]> {
        self.position(waypoint).map(|idx| &self.waypoints[idx..])
    }

    /// Replace the destination, keeping the rest of the path.
    pub fn with_destination(mut self, destination: &str) -> Self {
        if self.waypoints.len() < 2 {
            self.waypoints.push(destination.to_string());
        } else if let Some(last) = self.waypoints.last_mut() {
            *last = destination.to_string();
        }
        self
    }

    /// Replace both ends with literal labels, keeping the backbone in between.
    pub fn with_endpoints(mut self, origin: &str, destination: &str) -> Self {
        match self.waypoints.first_mut() {
            Some(first) => *first = origin.to_string(),
            None => self.waypoints.push(origin.to_string()),
        }
        self.with_destination(destination)
    }
}

impl From<Vec<String>> for Route {
    fn from(waypoints: Vec<String>) -> Self {
        Self::new(waypoints)
    }
}

impl From<&[&str]> for Route {
    fn from(waypoints: &[&str]) -> Self {
        Self::new(waypoints.iter().map(|w| w.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_rewrite_keeps_backbone() {
        let route = Route::from(&["A", "B", "C", "D"][..]).with_endpoints("home", "campus");
        assert_eq!(route.waypoints(), &["home", "B", "C", "campus"]);
        assert_eq!(route.segment_count(), 3);
    }

    #[test]
    fn destination_replaces_last_waypoint() {
        let route = Route::from(&["A", "B", "HUB"][..]).with_destination("Campus");
        assert_eq!(route.waypoints(), &["A", "B", "Campus"]);
        let route = Route::from(&["A", "HUB"][..]).with_destination("Campus");
        assert_eq!(route.waypoints(), &["A", "Campus"]);
    }

    #[test]
    fn destination_on_short_route_appends() {
        let route = Route::from(&["A"][..]).with_destination("Z");
        assert_eq!(route.waypoints(), &["A", "Z"]);
        let route = Route::default().with_endpoints("A", "Z");
        assert_eq!(route.waypoints(), &["A", "Z"]);
    }

    #[test]
    fn suffix_from_merge_point() {
        let route = Route::from(&["A", "B", "C"][..]);
        assert_eq!(route.suffix_from("B"), Some(&route.waypoints()[1..]));
        assert_eq!(route.suffix_from("X"), None);
    }
}
