use vessel::{step_vessel, Forcing, VesselSpawn, VesselState};

fn with_ballast(level: f64) -> VesselState {
    let mut state = VesselState::new(VesselSpawn::default());
    state.set_ballast(level);
    state
}

#[test]
fn gm_grows_with_ballast() {
    let empty = with_ballast(0.0).metacentric_height();
    let default = VesselState::new(VesselSpawn::default()).metacentric_height();
    let full = with_ballast(1.0).metacentric_height();
    assert!(full > default, "GM full {} vs default {}", full, default);
    assert!(default > empty, "GM default {} vs empty {}", default, empty);
}

#[test]
fn cg_rises_with_ballast() {
    let empty = with_ballast(0.0).center_of_gravity_height();
    let full = with_ballast(1.0).center_of_gravity_height();
    assert!(full > empty);
}

#[test]
fn heavy_ballast_settles_deeper() {
    let mut light = with_ballast(0.0);
    let mut heavy = with_ballast(1.0);
    for _ in 0..300 {
        step_vessel(&mut light, 0.1, &Forcing::calm());
        step_vessel(&mut heavy, 0.1, &Forcing::calm());
    }
    let zl = light.kinematics().z;
    let zh = heavy.kinematics().z;
    assert!(zl < 0.0, "light hull should float below datum, z = {}", zl);
    assert!(zh < zl, "heavy z {} should sit below light z {}", zh, zl);
}
