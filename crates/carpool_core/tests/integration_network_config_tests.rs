use std::io::Write;

use carpool_core::network::{NetworkConfig, RoadNetwork};
use carpool_core::{NetworkError, TrafficRegime};

const SMALL_NETWORK: &str = r#"{
    "name": "campus-loop",
    "default_segment_minutes": 4.0,
    "peak_multiplier": 1.5,
    "adjacency": {
        "North Gate": { "Library": 2.0 },
        "Library": { "Hub": 3.0 },
        "Dorms": { "Library": 1.0 }
    },
    "main_routes": [
        { "name": "north", "origin_keywords": ["north"], "waypoints": ["North Gate", "Library", "Hub"] }
    ],
    "feeders": [
        { "name": "dorms", "merge_point": "Library", "waypoints": ["Dorms", "Library"] },
        { "name": "orphan", "merge_point": "Nowhere", "waypoints": ["Lot B", "Nowhere"] }
    ]
}"#;

#[test]
fn composite_routes_follow_their_parent_after_the_merge() {
    let network = RoadNetwork::miami_fiu().expect("bundled network");
    for composed in network.composed_routes() {
        let (Some(parent), Some(merge)) = (&composed.parent, &composed.merge_point) else {
            continue;
        };
        let main = network
            .main_routes()
            .iter()
            .find(|m| &m.name == parent)
            .expect("parent main route exists");
        assert_eq!(
            composed.route.suffix_from(merge),
            main.route.suffix_from(merge),
            "{} diverges from {}",
            composed.name,
            parent
        );
    }
}

#[test]
fn custom_network_from_json() {
    let network = RoadNetwork::from_json_str(SMALL_NETWORK).expect("valid network");
    assert_eq!(network.name(), "campus-loop");
    // The orphan feeder has no main route to join.
    let names: Vec<_> = network.composed_routes().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["north", "dorms+north"]);

    let dorms = &network.composed_routes()[1].route;
    assert_eq!(dorms.waypoints(), &["Dorms", "Library", "Hub"]);
    assert_eq!(network.route_duration(dorms, TrafficRegime::OffPeak), 4);
    assert_eq!(network.route_duration(dorms, TrafficRegime::Peak), 6);
    assert_eq!(network.segment_duration("Hub", "Dorms"), 4.0);
}

#[test]
fn network_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(SMALL_NETWORK.as_bytes()).expect("write network");
    let network = RoadNetwork::from_path(file.path()).expect("loads");
    assert_eq!(network.main_routes().len(), 1);
    assert_eq!(network.peak_multiplier(), 1.5);
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = RoadNetwork::from_path("/no/such/network.json").expect_err("missing");
    assert!(matches!(err, NetworkError::Io { .. }));
    assert!(err.to_string().contains("/no/such/network.json"));
}

#[test]
fn structural_problems_are_rejected() {
    let no_mains = r#"{ "main_routes": [], "feeders": [] }"#;
    assert!(matches!(
        RoadNetwork::from_json_str(no_mains),
        Err(NetworkError::NoMainRoutes)
    ));

    let short = r#"{ "main_routes": [ { "name": "stub", "waypoints": ["Hub"] } ] }"#;
    assert!(matches!(
        RoadNetwork::from_json_str(short),
        Err(NetworkError::RouteTooShort { .. })
    ));

    let mut config: NetworkConfig = serde_json::from_str(SMALL_NETWORK).expect("parses");
    config.feeders[0].waypoints = vec!["Dorms".into(), "Quad".into()];
    assert!(matches!(
        RoadNetwork::from_config(config),
        Err(NetworkError::FeederMergeMismatch { .. })
    ));

    assert!(matches!(
        RoadNetwork::from_json_str("not json"),
        Err(NetworkError::Parse(_))
    ));
}
