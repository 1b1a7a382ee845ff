use std::sync::Arc;

use framelogic::FramelogicError;
use framelogic::attributes;
use framelogic::concept::{AtomicConcept, Concept};
use framelogic::constraint::Constraint;
use framelogic::frame::{FrameSchema, RoleTag};
use framelogic::world::{FrameInstance, PossibleWorld};

fn role(values: &[&str]) -> AtomicConcept {
    AtomicConcept::new("role", Constraint::enumeration(values.iter().copied()).expect("non-empty"))
}

fn hub() -> Concept {
    Concept::composite("Hub", [role(&["Hub"])])
}

fn sensor() -> Concept {
    Concept::composite("Sensor", [role(&["Sensor"])])
}

fn home() -> PossibleWorld {
    let mut world = PossibleWorld::new("Home");
    world
        .add_concept("hub_main", attributes! { "protocol" => "WiFi", "battery" => 100, "role" => "Hub" })
        .add_concept("hub_bridge", attributes! { "protocol" => "WiFi", "battery" => 100, "role" => "Hub" })
        .add_concept("sensor_1", attributes! { "protocol" => "ZigBee", "battery" => 90, "role" => "Sensor" })
        .add_concept("sensor_weak", attributes! { "protocol" => "ZigBee", "battery" => 10, "role" => "Sensor" });
    world
}

fn monitor() -> Arc<FrameSchema> {
    Arc::new(FrameSchema::new("Monitor", [
        ("actor", RoleTag::Controller, hub()),
        ("target", RoleTag::Managed, sensor()),
    ]))
}

fn uids(world: &PossibleWorld, concept: &Concept) -> Vec<String> {
    world.get_extension(concept).iter().map(|i| i.uid().to_owned()).collect()
}

#[test]
fn extension_keeps_insertion_order() {
    let world = home();
    assert_eq!(uids(&world, &hub()), vec!["hub_main", "hub_bridge"]);
    assert_eq!(uids(&world, &sensor()), vec!["sensor_1", "sensor_weak"]);
    let nothing = Concept::atomic("role", Constraint::enumeration(["Gateway"]).expect("non-empty"));
    assert!(world.get_extension(&nothing).is_empty());
}

#[test]
fn last_write_wins_in_place() {
    let mut world = home();
    world.add_concept("hub_main", attributes! { "role" => "Sensor" });
    assert_eq!(world.len(), 4, "an overwrite does not add an instance");
    assert_eq!(uids(&world, &sensor()), vec!["hub_main", "sensor_1", "sensor_weak"]);
    let replaced = world.get_concept("hub_main").expect("still there");
    assert_eq!(replaced.data(), &attributes! { "role" => "Sensor" });
    assert!(world.get_concept("missing").is_none());
}

#[test]
fn valid_frame_instance_is_added() {
    let mut world = home();
    let schema = monitor();
    let frame = FrameInstance::new(Arc::clone(&schema), [
        ("actor", world.get_concept("hub_main").expect("kept")),
        ("target", world.get_concept("sensor_1").expect("kept")),
    ])
    .expect("arguments satisfy their roles");
    assert_eq!(frame.binding("target").map(|i| i.uid().to_owned()), Some("sensor_1".to_owned()));
    assert_eq!(frame.to_string(), "FrameInstance[Monitor](Controller->hub_main:Hub, Managed->sensor_1:Sensor)");
    world.add_frame(frame);
    assert_eq!(world.frames().len(), 1);
}

#[test]
fn missing_argument_is_a_mismatch() {
    let world = home();
    let err = FrameInstance::new(monitor(), [
        ("actor", world.get_concept("hub_main").expect("kept")),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        FramelogicError::ArgumentMismatch {
            required: vec!["actor".into(), "target".into()],
            provided: vec!["actor".into()],
        }
    );
}

#[test]
fn extra_argument_is_a_mismatch() {
    let world = home();
    let err = FrameInstance::new(monitor(), [
        ("actor", world.get_concept("hub_main").expect("kept")),
        ("target", world.get_concept("sensor_1").expect("kept")),
        ("gateway", world.get_concept("hub_bridge").expect("kept")),
    ])
    .unwrap_err();
    assert!(matches!(err, FramelogicError::ArgumentMismatch { .. }));
}

#[test]
fn wrong_concept_is_a_type_violation() {
    let world = home();
    let err = FrameInstance::new(monitor(), [
        ("actor", world.get_concept("hub_main").expect("kept")),
        ("target", world.get_concept("hub_bridge").expect("kept")),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        FramelogicError::TypeViolation {
            variable: "target".into(),
            uid: "hub_bridge".into(),
            concept: "Sensor".into(),
        }
    );
    assert_eq!(err.to_string(), "Argument 'target' (uid='hub_bridge') violates type 'Sensor'");
}

#[test]
fn frame_instances_belong_to_ancestor_schemas() {
    let mut world = home();
    let monitor = monitor();
    let relay = Arc::new(FrameSchema::new("Relay", [("gateway", RoleTag::Gateway, hub())]));
    let relayed = Arc::new((monitor.as_ref() & relay.as_ref()).expect("roles agree"));

    let hub_main = world.get_concept("hub_main").expect("kept");
    let hub_bridge = world.get_concept("hub_bridge").expect("kept");
    let sensor_1 = world.get_concept("sensor_1").expect("kept");

    let plain = FrameInstance::new(Arc::clone(&monitor), [
        ("actor", Arc::clone(&hub_main)),
        ("target", Arc::clone(&sensor_1)),
    ])
    .expect("valid");
    let routed = FrameInstance::new(Arc::clone(&relayed), [
        ("actor", hub_main),
        ("target", sensor_1),
        ("gateway", hub_bridge),
    ])
    .expect("valid");

    assert!(routed.is_instance_of(&monitor));
    assert!(routed.is_instance_of(&relay));
    assert!(!plain.is_instance_of(&relayed));

    world.add_frame(plain).add_frame(routed);
    assert_eq!(world.get_frame_extension(&monitor).len(), 2);
    assert_eq!(world.get_frame_extension(&relay).len(), 1);
    assert_eq!(world.get_frame_extension(&relayed).len(), 1);
}

#[test]
fn frames_are_not_deduplicated() {
    let mut world = home();
    let schema = monitor();
    for _ in 0..2 {
        let frame = FrameInstance::new(Arc::clone(&schema), [
            ("actor", world.get_concept("hub_main").expect("kept")),
            ("target", world.get_concept("sensor_1").expect("kept")),
        ])
        .expect("valid");
        world.add_frame(frame);
    }
    assert_eq!(world.frames().len(), 2);
}

#[test]
fn printed_forms() {
    let world = home();
    assert_eq!(world.to_string(), "World<Home>");
    let instance = world.get_concept("sensor_1").expect("kept");
    assert_eq!(instance.to_string(), "Inst(sensor_1, {battery: 90, protocol: \"ZigBee\", role: \"Sensor\"})");
}
