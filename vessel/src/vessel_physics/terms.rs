use std::f64::consts::TAU;

use crate::hull_specs::VesselParams;
use crate::sea_state::GRAVITY;

use super::safety::SanitizedForcing;

pub const WATER_DENSITY: f64 = 1025.0;
pub(super) const SHALLOW_WATER_MIN_RATIO: f64 = 1.1;
pub(super) const SHALLOW_WATER_MAX_RATIO: f64 = 3.0;
pub(super) const MAX_YAW_RATE: f64 = 0.8;
pub(super) const MAX_YAW_MULTIPLIER: f64 = 1.5;
pub(super) const MAX_SPEED_MULTIPLIER: f64 = 1.2;
const WAVE_HEIGHT_PER_WIND: f64 = 0.05;
const MAX_WIND_WAVE_HEIGHT: f64 = 3.0;

// ----- Shallow water -----

/// Blend in [0, 1]: 0 at depth >= 3·draft, 1 at or under 1.1·draft.
/// The lower clamp applies to the interpolation only, not the gate.
pub(super) fn shallow_water_blend(water_depth: Option<f64>, draft: f64) -> f64 {
    let ratio = match water_depth {
        Some(depth) => depth / (draft + 0.01),
        None => SHALLOW_WATER_MAX_RATIO + 1.0,
    };
    if ratio > 0.0 && ratio < SHALLOW_WATER_MAX_RATIO {
        let clamped = ratio.max(SHALLOW_WATER_MIN_RATIO);
        (SHALLOW_WATER_MAX_RATIO - clamped) / (SHALLOW_WATER_MAX_RATIO - SHALLOW_WATER_MIN_RATIO)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct ShallowFactors {
    pub drag: f64,
    pub yaw: f64,
    pub rudder: f64,
}

pub(super) fn shallow_factors(params: &VesselParams, t: f64) -> ShallowFactors {
    ShallowFactors {
        drag: 1.0 + params.shallow_water_factor * t,
        yaw: 1.0 + params.shallow_water_yaw_factor * t,
        rudder: 1.0 - (1.0 - params.shallow_water_rudder_factor) * t,
    }
}

// ----- Hull -----

pub(super) fn surge_area(params: &VesselParams) -> f64 {
    let hull_factor = 0.7 + params.block_coefficient * 0.6;
    (params.length * params.draft * hull_factor).max(1.0)
}

pub(super) fn sway_area(params: &VesselParams) -> f64 {
    (params.beam * params.draft * (0.7 + params.block_coefficient * 0.3)).max(1.0)
}

/// Quadratic drag `0.5·ρ·Cd·A·v·|v|`, scaled for shallow water.
pub(super) fn quadratic_drag(cd: f64, area: f64, v: f64, shallow: f64) -> f64 {
    0.5 * WATER_DENSITY * cd * area * v * v.abs() * shallow
}

pub(super) fn hull_coupling_sway(params: &VesselParams, v_rel: f64, r: f64) -> f64 {
    -(params.hull_yv * v_rel + params.hull_yr * r)
}

pub(super) fn hull_coupling_yaw(params: &VesselParams, v_rel: f64, r: f64) -> f64 {
    -(params.hull_nv * v_rel + params.hull_nr * r)
}

pub(super) fn yaw_damping(params: &VesselParams, r: f64, shallow_yaw: f64) -> f64 {
    -params.yaw_damping * r * shallow_yaw - params.yaw_damping_quad * r * r.abs() * shallow_yaw
}

// ----- Rudder -----

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct RudderForce {
    pub wash_speed: f64,
    pub inflow_speed: f64,
    pub alpha: f64,
    pub stall_factor: f64,
    pub sway: f64,
    pub moment: f64,
}

/// Induced inflow from the propeller race.
pub(super) fn prop_wash_speed(params: &VesselParams, thrust: f64) -> f64 {
    if params.prop_wash_factor > 0.0 {
        (thrust.abs() / (0.5 * WATER_DENSITY * params.rudder_area + 1e-6)).sqrt()
            * params.prop_wash_factor
    } else {
        0.0
    }
}

/// Lift factor `1 - ratio²` below stall, zero at or beyond it.
pub(super) fn stall_factor(alpha: f64, stall_angle: f64) -> f64 {
    let ratio = if stall_angle > 0.0 {
        alpha.abs() / stall_angle
    } else {
        1.0
    };
    if ratio >= 1.0 {
        0.0
    } else {
        1.0 - ratio * ratio
    }
}

pub(super) fn rudder_force(
    params: &VesselParams,
    rudder_angle: f64,
    u_rel: f64,
    v_rel: f64,
    thrust: f64,
    shallow_rudder: f64,
) -> RudderForce {
    let flow_speed = u_rel.hypot(v_rel);
    let wash_speed = prop_wash_speed(params, thrust);
    let inflow_speed = (flow_speed * flow_speed + wash_speed * wash_speed).sqrt();
    let inflow_angle = v_rel.atan2(u_rel.max(0.1));
    let alpha = rudder_angle - inflow_angle;
    let stall = stall_factor(alpha, params.rudder_stall_angle);
    let lift = params.rudder_lift_slope * alpha * stall.max(0.0);
    let force = 0.5 * WATER_DENSITY * params.rudder_area * inflow_speed * inflow_speed * lift;
    let sway = force * shallow_rudder;
    RudderForce {
        wash_speed,
        inflow_speed,
        alpha,
        stall_factor: stall,
        sway,
        moment: sway * params.rudder_arm,
    }
}

// ----- Wind -----

/// Simplified windage yaw moment, subtracted from the yaw balance.
pub(super) fn wind_yaw_moment(wind_speed: f64, wind_direction: f64, heading: f64) -> f64 {
    wind_speed * wind_speed * 0.01 * (wind_direction - heading).sin()
}

// ----- Waves -----

#[derive(Debug, Clone, Copy)]
pub(super) struct ResolvedWave {
    pub amplitude: f64,
    pub length: f64,
    pub direction: f64,
    pub steepness: f64,
    pub k: f64,
    pub omega: f64,
}

/// Explicit wave inputs where valid, otherwise derived from wind and hull length.
pub(super) fn resolve_wave(forcing: &SanitizedForcing, params: &VesselParams) -> ResolvedWave {
    let height = forcing
        .wave_height
        .unwrap_or_else(|| (forcing.wind_speed * WAVE_HEIGHT_PER_WIND).min(MAX_WIND_WAVE_HEIGHT));
    let amplitude = height * 0.5;
    let length = forcing
        .wave_length
        .unwrap_or_else(|| (params.length * 2.0).max(20.0));
    let direction = forcing.wave_direction.unwrap_or(forcing.wind_direction);
    let k = TAU / length;
    let omega = (GRAVITY * k).sqrt();
    let steepness = forcing
        .wave_steepness
        .unwrap_or_else(|| (amplitude * k).min(0.7));
    ResolvedWave {
        amplitude,
        length,
        direction,
        steepness,
        k,
        omega,
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct WaveSample {
    pub elevation: f64,
    pub slope_x: f64,
    pub slope_y: f64,
}

pub(super) fn wave_phase(k: f64, omega: f64, direction: f64, x: f64, y: f64, time: f64) -> f64 {
    k * (direction.cos() * x + direction.sin() * y) - omega * time
}

pub(super) fn sample_wave(wave: &ResolvedWave, x: f64, y: f64, time: f64) -> WaveSample {
    let phase = wave_phase(wave.k, wave.omega, wave.direction, x, y, time);
    let slope = wave.steepness * phase.cos();
    WaveSample {
        elevation: wave.amplitude * phase.sin(),
        slope_x: slope * wave.direction.cos(),
        slope_y: slope * wave.direction.sin(),
    }
}

// ----- Seakeeping -----

pub(super) fn neutral_draft(params: &VesselParams, effective_mass: f64) -> f64 {
    effective_mass
        / (WATER_DENSITY * params.length * params.beam * params.block_coefficient + 1e-6)
}

pub(super) fn gm_roll(params: &VesselParams) -> f64 {
    params.beam * params.beam * params.block_coefficient / (12.0 * (params.draft + 0.1))
}

pub(super) fn gm_pitch(params: &VesselParams) -> f64 {
    params.length * params.block_coefficient / (12.0 * (params.draft + 0.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_blend_gates_and_clamps() {
        let draft = 10.0 - 0.01;
        assert_eq!(shallow_water_blend(None, draft), 0.0);
        assert_eq!(shallow_water_blend(Some(40.0), draft), 0.0);
        assert_eq!(shallow_water_blend(Some(30.5), draft), 0.0);
        assert!((shallow_water_blend(Some(20.5), draft) - 0.5).abs() < 1e-12);
        // under the minimum ratio the numerator saturates at 1
        assert_eq!(shallow_water_blend(Some(5.0), draft), 1.0);
    }

    #[test]
    fn shallow_factors_at_full_blend() {
        let p = VesselParams::default();
        let f = shallow_factors(&p, 1.0);
        assert!((f.drag - 2.5).abs() < 1e-12);
        assert!((f.yaw - 2.4).abs() < 1e-12);
        assert!((f.rudder - 0.7).abs() < 1e-12);
    }

    #[test]
    fn stall_factor_floors_at_zero() {
        assert_eq!(stall_factor(0.0, 0.5), 1.0);
        assert!((stall_factor(0.25, 0.5) - 0.75).abs() < 1e-12);
        assert_eq!(stall_factor(0.5, 0.5), 0.0);
        assert_eq!(stall_factor(-1.2, 0.5), 0.0);
        assert_eq!(stall_factor(0.1, 0.0), 0.0);
    }

    #[test]
    fn drag_opposes_motion() {
        assert!(quadratic_drag(0.8, 100.0, 2.0, 1.0) > 0.0);
        assert!(quadratic_drag(0.8, 100.0, -2.0, 1.0) < 0.0);
    }

    #[test]
    fn rudder_side_force_follows_deflection() {
        let p = VesselParams::default();
        let port = rudder_force(&p, 0.2, 5.0, 0.0, 4.0e5, 1.0);
        let stbd = rudder_force(&p, -0.2, 5.0, 0.0, 4.0e5, 1.0);
        assert!(port.sway > 0.0 && stbd.sway < 0.0);
        assert!((port.sway + stbd.sway).abs() < 1e-6);
        assert!((port.moment - port.sway * p.rudder_arm).abs() < 1e-6);
        // stalled rudder produces no lift
        let stalled = rudder_force(&p, 0.6, 0.0, 0.0, 0.0, 1.0);
        assert!(stalled.sway.abs() < 1e-12);
    }

    #[test]
    fn wind_derived_wave() {
        let p = VesselParams::default();
        let f = SanitizedForcing {
            wind_speed: 100.0,
            wind_direction: 0.7,
            current_speed: 0.0,
            current_direction: 0.0,
            wave_height: None,
            wave_length: None,
            wave_direction: None,
            wave_steepness: None,
            water_depth: None,
        };
        let w = resolve_wave(&f, &p);
        assert_eq!(w.amplitude, 1.5);
        assert_eq!(w.length, 240.0);
        assert_eq!(w.direction, 0.7);
        assert!(w.steepness <= 0.7);
    }
}
