//! Resolution tests against a captured spec document and generated documents

use miot_spec::{pick, Access, AccessMode, DeviceId, Property, Service, SpecDocument};
use proptest::prelude::*;
use rstest::rstest;
use std::fs;
use std::path::PathBuf;

fn load_fixture(filename: &str) -> SpecDocument {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(filename);

    let json = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e));
    SpecDocument::from_json(&json)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", filename, e))
}

#[rstest]
#[case(
    AccessMode::Read,
    vec!["123.1.1", "123.1.2", "123.1.3", "123.1.4", "123.2.1", "123.2.2", "123.2.3", "123.2.4"]
)]
#[case(AccessMode::Write, vec!["123.2.1", "123.2.2", "123.2.3", "123.2.4", "123.200.1"])]
#[case(AccessMode::Notify, vec!["123.2.1", "123.2.2", "123.2.3", "123.2.4"])]
fn test_yeelink_fixture_pids(#[case] access: AccessMode, #[case] expected: Vec<&str>) {
    let spec = load_fixture("yeelink_color1.json");
    let did = DeviceId::new("123");

    let pids: Vec<String> = pick(&did, &spec, access).map(|p| p.to_string()).collect();

    assert_eq!(pids, expected);
}

#[test]
fn test_fixture_reserializes_to_same_pids() {
    let spec = load_fixture("yeelink_color1.json");
    let reparsed = SpecDocument::from_json(&spec.to_json().unwrap()).unwrap();
    let did = DeviceId::new("123");

    let before: Vec<_> = pick(&did, &spec, AccessMode::Read).collect();
    let after: Vec<_> = pick(&did, &reparsed, AccessMode::Read).collect();

    assert_eq!(before, after);
}

fn access_strategy() -> impl Strategy<Value = Vec<AccessMode>> {
    proptest::sample::subsequence(
        vec![AccessMode::Read, AccessMode::Write, AccessMode::Notify],
        0..=3,
    )
}

fn mode_strategy() -> impl Strategy<Value = AccessMode> {
    prop_oneof![
        Just(AccessMode::Read),
        Just(AccessMode::Write),
        Just(AccessMode::Notify),
    ]
}

fn spec_strategy() -> impl Strategy<Value = SpecDocument> {
    let property = (1u32..50, access_strategy()).prop_map(|(iid, modes)| Property {
        iid,
        property_type: String::new(),
        description: String::new(),
        format: None,
        access: modes.into_iter().map(Access::Mode).collect(),
    });
    prop::collection::vec(prop::collection::vec(property, 0..6), 0..6).prop_map(|services| {
        SpecDocument {
            device_type: String::new(),
            description: String::new(),
            services: services
                .into_iter()
                .enumerate()
                .map(|(idx, properties)| Service {
                    iid: idx as u32 + 1,
                    service_type: String::new(),
                    description: String::new(),
                    properties,
                    actions: Vec::new(),
                    events: Vec::new(),
                })
                .collect(),
        }
    })
}

proptest! {
    #[test]
    fn prop_only_matching_properties_are_emitted(spec in spec_strategy(), mode in mode_strategy()) {
        let did = DeviceId::new("dev");
        let expected: Vec<String> = spec
            .services
            .iter()
            .flat_map(|s| {
                s.properties
                    .iter()
                    .filter(|p| p.access.contains(&Access::Mode(mode)))
                    .map(move |p| format!("dev.{}.{}", s.iid, p.iid))
            })
            .collect();

        let actual: Vec<String> = pick(&did, &spec, mode).map(|p| p.to_string()).collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_earlier_services_come_first(spec in spec_strategy(), mode in mode_strategy()) {
        let did = DeviceId::new("dev");
        let siids: Vec<u32> = pick(&did, &spec, mode).map(|pid| pid.siid).collect();

        // Generated services are numbered in document order.
        prop_assert!(siids.windows(2).all(|w| w[0] <= w[1]));
    }
}
