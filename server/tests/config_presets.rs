use server::{build_fleet, parse_config};
use vessel::param_abi::PARAM_ENGINE_TIME_CONSTANT;
use vessel::{hullspecs, AllocationMode};

const HARBOR: &str = r#"
tick_hz = 10.0
telemetry_every = 0
sea_state = 4.0

[environment]
wind_speed = 8.0
wind_direction = 1.0
water_depth = 25.0

[[vessels]]
name = "tug"
preset = "tug"
x = 10.0
throttle = 0.4

[[vessels]]
name = "box"
preset = "container"
heading = 1.0
ballast = 0.8

[vessels.params]
engine_time_constant = 3.0
"#;

#[test]
fn harbor_scene_spawns_every_vessel() {
    let cfg = parse_config(HARBOR).expect("parse");
    let env = cfg.resolved_environment();
    assert!(env.wave_height > 0.0, "sea state should set waves, got {}", env.wave_height);
    assert_eq!(env.water_depth, 25.0);

    let (fleet, spawned) = build_fleet(&cfg).expect("fleet");
    assert_eq!(fleet.len(), 2);
    let names: Vec<_> = spawned.iter().map(|(_, n)| n.as_str()).collect();
    assert_eq!(names, ["tug", "box"]);

    let tug = fleet.get(spawned[0].0).expect("tug");
    assert_eq!(tug.kinematics().x, 10.0);
    assert_eq!(tug.controls().throttle, 0.4);
    assert_eq!(tug.params().mass, hullspecs::harbor_tug().params().mass);

    let boxship = fleet.get(spawned[1].0).expect("box");
    assert_eq!(boxship.controls().ballast, 0.8);
    assert_eq!(boxship.params().to_param_buffer()[PARAM_ENGINE_TIME_CONSTANT], 3.0);
    assert_eq!(boxship.params().length, hullspecs::container_ship().params().length);
}

#[test]
fn rejected_override_keeps_preset_value() {
    let text = r#"
        [[vessels]]
        name = "a"
        [vessels.params]
        mass = -5.0
    "#;
    let cfg = parse_config(text).expect("parse");
    let (fleet, spawned) = build_fleet(&cfg).expect("fleet");
    let a = fleet.get(spawned[0].0).expect("a");
    assert_eq!(a.params().mass, hullspecs::default_hull().params().mass);
}

#[test]
fn unknown_names_are_errors() {
    let bad_preset = r#"
        [[vessels]]
        name = "a"
        preset = "submarine"
    "#;
    let cfg = parse_config(bad_preset).expect("parse");
    assert!(build_fleet(&cfg).is_err());

    let bad_param = r#"
        [[vessels]]
        name = "a"
        [vessels.params]
        warp_factor = 9.0
    "#;
    let cfg = parse_config(bad_param).expect("parse");
    let err = build_fleet(&cfg).expect_err("unknown param");
    assert!(format!("{err:#}").contains("warp_factor"), "error was {err:#}");
}

#[test]
fn single_slot_keeps_first_vessel_only() {
    let text = r#"
        single_slot = true
        [[vessels]]
        name = "first"
        x = 1.0
        [[vessels]]
        name = "second"
        x = 2.0
    "#;
    let cfg = parse_config(text).expect("parse");
    assert_eq!(cfg.allocation_mode(), AllocationMode::SingleSlot);
    let (fleet, spawned) = build_fleet(&cfg).expect("fleet");
    assert_eq!(fleet.len(), 1);
    assert_eq!(spawned.len(), 1);
    assert_eq!(fleet.get(spawned[0].0).expect("first").kinematics().x, 1.0);
}

#[test]
fn shipped_harbor_config_is_valid() {
    let cfg = parse_config(include_str!("../config/harbor.toml")).expect("parse");
    let (fleet, _) = build_fleet(&cfg).expect("fleet");
    assert_eq!(fleet.len(), 2);
}
