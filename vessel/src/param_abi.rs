//! Fixed-index flat buffer ABI for tuning coefficients and environment overrides.
//!
//! Each slot index maps to one named field. Writes are validated per field and
//! a rejected value leaves the previous one in place.
use tracing::debug;

use crate::hull_specs::VesselParams;
use crate::vessel_physics::VesselState;

pub const VESSEL_PARAM_BUFFER_CAPACITY: usize = 64;
pub const ENVIRONMENT_BUFFER_CAPACITY: usize = 16;

pub const MODEL_DISPLACEMENT: i32 = 0;
pub const MODEL_PLANING: i32 = 1;
pub const MODEL_SAILING: i32 = 2;
pub const MODEL_TOW_ASSIST: i32 = 3;

pub const PARAM_MASS: usize = 0;
pub const PARAM_LENGTH: usize = 1;
pub const PARAM_BEAM: usize = 2;
pub const PARAM_DRAFT: usize = 3;
pub const PARAM_BLOCK_COEFFICIENT: usize = 4;
pub const PARAM_RUDDER_FORCE_COEFFICIENT: usize = 5;
pub const PARAM_RUDDER_STALL_ANGLE: usize = 6;
pub const PARAM_RUDDER_MAX_ANGLE: usize = 7;
pub const PARAM_DRAG_COEFFICIENT: usize = 8;
pub const PARAM_YAW_DAMPING: usize = 9;
pub const PARAM_YAW_DAMPING_QUAD: usize = 10;
pub const PARAM_SWAY_DAMPING: usize = 11;
pub const PARAM_MAX_THRUST: usize = 12;
pub const PARAM_MAX_SPEED: usize = 13;
pub const PARAM_ROLL_DAMPING: usize = 14;
pub const PARAM_PITCH_DAMPING: usize = 15;
pub const PARAM_HEAVE_STIFFNESS: usize = 16;
pub const PARAM_HEAVE_DAMPING: usize = 17;
pub const PARAM_RUDDER_AREA: usize = 18;
pub const PARAM_RUDDER_ARM: usize = 19;
pub const PARAM_RUDDER_LIFT_SLOPE: usize = 20;
pub const PARAM_PROP_WASH: usize = 21;
pub const PARAM_ENGINE_TIME_CONSTANT: usize = 22;
pub const PARAM_RUDDER_RATE: usize = 23;
pub const PARAM_ADDED_MASS_X: usize = 24;
pub const PARAM_ADDED_MASS_Y: usize = 25;
pub const PARAM_ADDED_MASS_YAW: usize = 26;
pub const PARAM_HULL_YV: usize = 27;
pub const PARAM_HULL_YR: usize = 28;
pub const PARAM_HULL_NV: usize = 29;
pub const PARAM_HULL_NR: usize = 30;
pub const PARAM_CD_SURGE: usize = 31;
pub const PARAM_CD_SWAY: usize = 32;
pub const PARAM_CD_YAW: usize = 33;
pub const PARAM_SHALLOW_WATER_FACTOR: usize = 34;
pub const PARAM_SHALLOW_WATER_YAW_FACTOR: usize = 35;
pub const PARAM_SHALLOW_WATER_RUDDER_FACTOR: usize = 36;
pub const PARAM_COUNT: usize = 37;

pub const ENV_WIND_SPEED: usize = 0;
pub const ENV_WIND_DIRECTION: usize = 1;
pub const ENV_CURRENT_SPEED: usize = 2;
pub const ENV_CURRENT_DIRECTION: usize = 3;
pub const ENV_WAVE_HEIGHT: usize = 4;
pub const ENV_WAVE_LENGTH: usize = 5;
pub const ENV_WAVE_DIRECTION: usize = 6;
pub const ENV_WAVE_STEEPNESS: usize = 7;
pub const ENV_WATER_DEPTH: usize = 8;

/// Names addressable from configuration, indexed by slot.
pub const PARAM_NAMES: [&str; PARAM_COUNT] = [
    "mass",
    "length",
    "beam",
    "draft",
    "block_coefficient",
    "rudder_force_coefficient",
    "rudder_stall_angle",
    "rudder_max_angle",
    "drag_coefficient",
    "yaw_damping",
    "yaw_damping_quad",
    "sway_damping",
    "max_thrust",
    "max_speed",
    "roll_damping",
    "pitch_damping",
    "heave_stiffness",
    "heave_damping",
    "rudder_area",
    "rudder_arm",
    "rudder_lift_slope",
    "prop_wash_factor",
    "engine_time_constant",
    "rudder_rate_limit",
    "added_mass_x",
    "added_mass_y",
    "added_mass_yaw",
    "hull_yv",
    "hull_yr",
    "hull_nv",
    "hull_nr",
    "cd_surge",
    "cd_sway",
    "cd_yaw",
    "shallow_water_factor",
    "shallow_water_yaw_factor",
    "shallow_water_rudder_factor",
];

pub fn param_index(name: &str) -> Option<usize> {
    PARAM_NAMES.iter().position(|n| *n == name)
}

/// Validity predicate of one slot. Non-finite values never pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    Positive,
    NonNegative,
    AnyFinite,
}

impl Accept {
    pub fn admits(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Accept::Positive => value > 0.0,
            Accept::NonNegative => value >= 0.0,
            Accept::AnyFinite => true,
        }
    }
}

fn slot(p: &mut VesselParams, index: usize) -> Option<(&mut f64, Accept)> {
    use Accept::*;
    Some(match index {
        PARAM_MASS => (&mut p.mass, Positive),
        PARAM_LENGTH => (&mut p.length, Positive),
        PARAM_BEAM => (&mut p.beam, Positive),
        PARAM_DRAFT => (&mut p.draft, Positive),
        PARAM_BLOCK_COEFFICIENT => (&mut p.block_coefficient, Positive),
        PARAM_RUDDER_FORCE_COEFFICIENT => (&mut p.rudder_force_coefficient, NonNegative),
        PARAM_RUDDER_STALL_ANGLE => (&mut p.rudder_stall_angle, Positive),
        PARAM_RUDDER_MAX_ANGLE => (&mut p.rudder_max_angle, Positive),
        PARAM_DRAG_COEFFICIENT => (&mut p.drag_coefficient, NonNegative),
        PARAM_YAW_DAMPING => (&mut p.yaw_damping, NonNegative),
        PARAM_YAW_DAMPING_QUAD => (&mut p.yaw_damping_quad, NonNegative),
        PARAM_SWAY_DAMPING => (&mut p.sway_damping, NonNegative),
        PARAM_MAX_THRUST => (&mut p.max_thrust, NonNegative),
        PARAM_MAX_SPEED => (&mut p.max_speed, Positive),
        PARAM_ROLL_DAMPING => (&mut p.roll_damping, NonNegative),
        PARAM_PITCH_DAMPING => (&mut p.pitch_damping, NonNegative),
        PARAM_HEAVE_STIFFNESS => (&mut p.heave_stiffness, NonNegative),
        PARAM_HEAVE_DAMPING => (&mut p.heave_damping, NonNegative),
        PARAM_RUDDER_AREA => (&mut p.rudder_area, Positive),
        PARAM_RUDDER_ARM => (&mut p.rudder_arm, Positive),
        PARAM_RUDDER_LIFT_SLOPE => (&mut p.rudder_lift_slope, Positive),
        PARAM_PROP_WASH => (&mut p.prop_wash_factor, NonNegative),
        PARAM_ENGINE_TIME_CONSTANT => (&mut p.engine_time_constant, Positive),
        PARAM_RUDDER_RATE => (&mut p.rudder_rate_limit, Positive),
        PARAM_ADDED_MASS_X => (&mut p.added_mass_x, NonNegative),
        PARAM_ADDED_MASS_Y => (&mut p.added_mass_y, NonNegative),
        PARAM_ADDED_MASS_YAW => (&mut p.added_mass_yaw, NonNegative),
        PARAM_HULL_YV => (&mut p.hull_yv, AnyFinite),
        PARAM_HULL_YR => (&mut p.hull_yr, AnyFinite),
        PARAM_HULL_NV => (&mut p.hull_nv, AnyFinite),
        PARAM_HULL_NR => (&mut p.hull_nr, AnyFinite),
        PARAM_CD_SURGE => (&mut p.cd_surge, Positive),
        PARAM_CD_SWAY => (&mut p.cd_sway, Positive),
        PARAM_CD_YAW => (&mut p.cd_yaw, Positive),
        PARAM_SHALLOW_WATER_FACTOR => (&mut p.shallow_water_factor, NonNegative),
        PARAM_SHALLOW_WATER_YAW_FACTOR => (&mut p.shallow_water_yaw_factor, NonNegative),
        PARAM_SHALLOW_WATER_RUDDER_FACTOR => (&mut p.shallow_water_rudder_factor, NonNegative),
        _ => return None,
    })
}

/// Predicate for a slot index, `None` for unknown indices.
pub fn accept_rule(index: usize) -> Option<Accept> {
    let mut scratch = VesselParams::default();
    slot(&mut scratch, index).map(|(_, rule)| rule)
}

/// Write each admissible value from `values` into `params`. Returns the
/// number of slots taken.
pub fn apply_to_params(params: &mut VesselParams, values: &[f64]) -> usize {
    let len = values.len().min(VESSEL_PARAM_BUFFER_CAPACITY);
    let mut accepted = 0;
    for (index, &value) in values[..len].iter().enumerate() {
        let Some((field, rule)) = slot(params, index) else {
            continue;
        };
        if rule.admits(value) {
            *field = value;
            accepted += 1;
        }
    }
    accepted
}

/// Apply a flat coefficient buffer to a vessel.
///
/// The model id is always recorded. Only the displacement model reads the
/// buffer; other models leave the coefficients untouched and return 0.
pub fn apply_vessel_params(state: &mut VesselState, model_id: i32, values: &[f64]) -> usize {
    state.model_id = model_id;
    if model_id != MODEL_DISPLACEMENT || values.is_empty() {
        return 0;
    }
    let accepted = apply_to_params(&mut state.params, values);
    state.reclamp_rudder();
    debug!(model_id, supplied = values.len(), accepted, "vessel params applied");
    accepted
}

impl VesselParams {
    /// Encode into the flat ABI. Slots past the last index stay zero.
    pub fn to_param_buffer(&self) -> [f64; VESSEL_PARAM_BUFFER_CAPACITY] {
        let mut copy = *self;
        let mut buf = [0.0; VESSEL_PARAM_BUFFER_CAPACITY];
        for (index, out) in buf.iter_mut().enumerate().take(PARAM_COUNT) {
            if let Some((field, _)) = slot(&mut copy, index) {
                *out = *field;
            }
        }
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_line_up_with_indices() {
        assert_eq!(param_index("mass"), Some(PARAM_MASS));
        assert_eq!(param_index("engine_time_constant"), Some(PARAM_ENGINE_TIME_CONSTANT));
        assert_eq!(
            param_index("shallow_water_rudder_factor"),
            Some(PARAM_SHALLOW_WATER_RUDDER_FACTOR)
        );
        assert_eq!(param_index("warp_factor"), None);
        for index in 0..PARAM_COUNT {
            assert!(accept_rule(index).is_some(), "slot {index} unmapped");
        }
        assert!(accept_rule(PARAM_COUNT).is_none());
    }

    #[test]
    fn predicates() {
        assert!(!Accept::Positive.admits(0.0));
        assert!(Accept::NonNegative.admits(0.0));
        assert!(!Accept::NonNegative.admits(-0.1));
        assert!(Accept::AnyFinite.admits(-4.0));
        assert!(!Accept::AnyFinite.admits(f64::NAN));
        assert!(!Accept::Positive.admits(f64::INFINITY));
    }

    #[test]
    fn buffer_encoding_is_stable() {
        let p = VesselParams::default();
        let buf = p.to_param_buffer();
        assert_eq!(buf[PARAM_MASS], p.mass);
        assert_eq!(buf[PARAM_CD_YAW], p.cd_yaw);
        assert!(buf[PARAM_COUNT..].iter().all(|v| *v == 0.0));
        let mut other = VesselParams::for_hull(1.0, 1.0, 1.0, 1.0, &Default::default());
        assert_eq!(apply_to_params(&mut other, &buf), PARAM_COUNT);
        assert_eq!(other, p);
    }
}
