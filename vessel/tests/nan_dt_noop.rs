use vessel::{step_vessel, Forcing, Kinematics, StepOutcome, VesselSpawn, VesselState};

fn bits(k: &Kinematics) -> [u64; 12] {
    [
        k.x, k.y, k.z, k.heading, k.roll, k.pitch, k.u, k.v, k.w, k.r, k.p, k.q,
    ]
    .map(f64::to_bits)
}

#[test]
fn non_finite_dt_leaves_state_bit_identical() {
    let mut state = VesselState::new(VesselSpawn::default().at(10.0, -3.0, 0.4));
    state.set_throttle(0.8);
    state.set_rudder_angle(0.2);
    let forcing = Forcing::calm().with_wind(9.0, 1.0).with_current(0.5, 2.0);
    for _ in 0..20 {
        step_vessel(&mut state, 0.1, &forcing);
    }

    let before = state.clone();
    for dt in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(step_vessel(&mut state, dt, &forcing), StepOutcome::Skipped);
        assert_eq!(bits(state.kinematics()), bits(before.kinematics()));
        assert_eq!(state.fuel().level.to_bits(), before.fuel().level.to_bits());
        assert_eq!(state.wave().time, before.wave().time);
    }
}

#[test]
fn garbage_forcing_still_advances_finitely() {
    let mut state = VesselState::new(VesselSpawn::default());
    state.set_throttle(1.0);
    let forcing = Forcing {
        wind_speed: f64::NAN,
        wind_direction: f64::INFINITY,
        current_speed: f64::NEG_INFINITY,
        current_direction: f64::NAN,
        ..Forcing::calm()
    };
    for _ in 0..50 {
        assert_eq!(step_vessel(&mut state, 0.2, &forcing), StepOutcome::Advanced);
    }
    let k = state.kinematics();
    assert!(k.x.is_finite() && k.u.is_finite() && k.u > 0.0);
}
