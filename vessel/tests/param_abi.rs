use vessel::param_abi::{
    MODEL_DISPLACEMENT, MODEL_SAILING, PARAM_BEAM, PARAM_DRAG_COEFFICIENT, PARAM_HULL_NR,
    PARAM_MASS, PARAM_MAX_SPEED, PARAM_RUDDER_AREA, PARAM_SHALLOW_WATER_RUDDER_FACTOR,
    VESSEL_PARAM_BUFFER_CAPACITY,
};
use vessel::{apply_vessel_params, AllocationMode, Fleet, VesselParams, VesselSpawn, VesselState};

fn base_buffer(state: &VesselState) -> [f64; VESSEL_PARAM_BUFFER_CAPACITY] {
    state.params().to_param_buffer()
}

#[test]
fn invalid_values_keep_previous_coefficients() {
    let mut state = VesselState::new(VesselSpawn::default());
    let before = *state.params();
    let mut buf = base_buffer(&state);
    buf[PARAM_MASS] = -10.0;
    buf[PARAM_BEAM] = f64::NAN;
    buf[PARAM_MAX_SPEED] = 0.0;
    buf[PARAM_RUDDER_AREA] = f64::INFINITY;
    apply_vessel_params(&mut state, MODEL_DISPLACEMENT, &buf);
    assert_eq!(state.params().mass, before.mass);
    assert_eq!(state.params().beam, before.beam);
    assert_eq!(state.params().max_speed, before.max_speed);
    assert_eq!(state.params().rudder_area, before.rudder_area);
}

#[test]
fn zero_is_allowed_where_coefficients_may_vanish() {
    let mut state = VesselState::new(VesselSpawn::default());
    let mut buf = base_buffer(&state);
    buf[PARAM_DRAG_COEFFICIENT] = 0.0;
    buf[PARAM_SHALLOW_WATER_RUDDER_FACTOR] = 0.0;
    buf[PARAM_HULL_NR] = -3.5e6;
    apply_vessel_params(&mut state, MODEL_DISPLACEMENT, &buf);
    assert_eq!(state.params().drag_coefficient, 0.0);
    assert_eq!(state.params().shallow_water_rudder_factor, 0.0);
    assert_eq!(state.params().hull_nr, -3.5e6);
}

#[test]
fn short_buffer_ignores_later_indices() {
    let mut state = VesselState::new(VesselSpawn::default());
    let before = *state.params();
    let accepted = apply_vessel_params(&mut state, MODEL_DISPLACEMENT, &[7.0e6, 150.0]);
    assert_eq!(accepted, 2);
    assert_eq!(state.params().mass, 7.0e6);
    assert_eq!(state.params().length, 150.0);
    assert_eq!(state.params().beam, before.beam);
}

#[test]
fn oversized_buffer_is_truncated_to_capacity() {
    let mut state = VesselState::new(VesselSpawn::default());
    let mut values = base_buffer(&state).to_vec();
    values.extend(std::iter::repeat(1.0).take(100));
    let accepted = apply_vessel_params(&mut state, MODEL_DISPLACEMENT, &values);
    assert_eq!(accepted, vessel::param_abi::PARAM_COUNT);
}

#[test]
fn other_models_are_recorded_but_not_applied() {
    let mut state = VesselState::new(VesselSpawn::default());
    let before = *state.params();
    let accepted = apply_vessel_params(&mut state, MODEL_SAILING, &[1.0e6; 10]);
    assert_eq!(accepted, 0);
    assert_eq!(state.model_id(), MODEL_SAILING);
    assert_eq!(*state.params(), before);
}

#[test]
fn fleet_staging_buffer_applies_prefix() {
    let mut fleet = Fleet::new(AllocationMode::AlwaysNew);
    let id = fleet.create(VesselSpawn::default());
    let encoded = VesselParams::default().to_param_buffer();
    {
        let buf = fleet.param_buffer_mut();
        *buf = encoded;
        buf[PARAM_MASS] = 9.0e6;
        buf[PARAM_BEAM] = 31.0;
    }
    let accepted = fleet
        .apply_param_buffer(id, MODEL_DISPLACEMENT, PARAM_MASS + 1)
        .expect("live vessel");
    assert_eq!(accepted, 1);
    let p = fleet.get(id).expect("live vessel").params();
    assert_eq!(p.mass, 9.0e6);
    assert_eq!(p.beam, VesselParams::default().beam);
}
