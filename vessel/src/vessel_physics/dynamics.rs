use tracing::warn;

use super::safety::{clamp_dt, state_is_finite, Checkpoint, SanitizedForcing};
use super::terms::*;
use super::types::{StepOutcome, VesselState, VesselStepDebug};
use crate::environment::Forcing;
use crate::math::{body_to_world, clamp01, clamp_signed, normalize_angle, world_flow_to_body};
use crate::sea_state::GRAVITY;

/// Advance one vessel by `dt` seconds under `forcing`.
/// See `step_vessel_dbg` for the force breakdown.
pub fn step_vessel(state: &mut VesselState, dt: f64, forcing: &Forcing) -> StepOutcome {
    step_vessel_dbg(state, dt, forcing, None)
}

/// Variant of `step_vessel` that fills out an optional debug telemetry struct.
///
/// A non-finite `dt` is a no-op. Any other `dt` is clamped to [0, 0.25] s.
/// If integration produces non-finite state the vessel is rolled back to
/// its pre-step values.
pub fn step_vessel_dbg(
    state: &mut VesselState,
    dt: f64,
    forcing: &Forcing,
    mut dbg: Option<&mut VesselStepDebug>,
) -> StepOutcome {
    let Some(dt) = clamp_dt(dt) else {
        return StepOutcome::Skipped;
    };
    let checkpoint = Checkpoint::capture(state);
    let forcing = SanitizedForcing::from_forcing(forcing);

    integrate(state, dt, &forcing, dbg.as_deref_mut());

    if !state_is_finite(state) {
        warn!(
            model_id = state.model_id,
            dt, "vessel step produced non-finite state, restoring checkpoint"
        );
        checkpoint.restore(state);
        return StepOutcome::Restored;
    }
    StepOutcome::Advanced
}

fn integrate(
    state: &mut VesselState,
    dt: f64,
    forcing: &SanitizedForcing,
    dbg: Option<&mut VesselStepDebug>,
) {
    let p = state.params;

    // Ballast adds inertia
    let ballast = clamp01(state.control.ballast);
    let effective_mass = p.mass * (0.9 + ballast * 0.4); // kg, 0.9..1.3 x hull mass

    // Engine lag
    let command = clamp_signed(state.control.throttle_command, 1.0);
    let tau = p.engine_time_constant.max(0.05);
    let c = &mut state.control;
    c.throttle = clamp_signed(c.throttle + (command - c.throttle) / tau * dt, 1.0);

    // Rudder slew
    let delta = c.rudder_command - c.rudder_angle;
    let max_step = if p.rudder_rate_limit > 0.0 {
        p.rudder_rate_limit * dt
    } else {
        delta.abs()
    };
    if delta.abs() <= max_step {
        c.rudder_angle = c.rudder_command;
    } else {
        c.rudder_angle += max_step.copysign(delta);
    }

    // Fuel: an empty tank flames the engine out, the command survives
    if state.fuel.level <= 0.0 {
        c.throttle = 0.0;
    }
    let throttle = c.throttle;
    let rudder_angle = c.rudder_angle;
    let thrust = p.max_thrust * throttle; // N along +surge, negative astern
    let fuel_burn = throttle.abs() * state.fuel.consumption_rate * dt; // tank fraction
    state.fuel.level = clamp01(state.fuel.level - fuel_burn);
    state.fuel.last_consumption = if dt > 0.0 {
        fuel_burn / dt * 3600.0 // tank fraction per hour
    } else {
        0.0
    };

    let k = &state.kin;
    let current =
        world_flow_to_body(k.heading, forcing.current_speed, forcing.current_direction);
    // Water-relative body velocities (m/s). +u forward, +v to port
    let u_rel = k.u - current.x;
    let v_rel = k.v - current.y;

    let shallow_t = shallow_water_blend(forcing.water_depth, p.draft);
    let shallow = shallow_factors(&p, shallow_t);

    // Hull
    let drag_surge = quadratic_drag(p.cd_surge, surge_area(&p), u_rel, shallow.drag);
    let drag_sway = quadratic_drag(p.cd_sway, sway_area(&p), v_rel, shallow.drag);
    let sway_linear = p.sway_damping * v_rel;
    let hull_sway = hull_coupling_sway(&p, v_rel, k.r);
    let hull_yaw = hull_coupling_yaw(&p, v_rel, k.r);

    // Positive rudder angle gives a +v side force and a +r moment
    let rudder = rudder_force(&p, rudder_angle, u_rel, v_rel, thrust, shallow.rudder);
    // Positive when the wind direction lies to port of the heading
    let wind_yaw = wind_yaw_moment(forcing.wind_speed, forcing.wind_direction, k.heading);

    let mass_x = (effective_mass + p.added_mass_x).max(1.0);
    let mass_y = (effective_mass + p.added_mass_y).max(1.0);
    let izz = (effective_mass * p.length * p.length * 0.1 + p.added_mass_yaw).max(1.0); // kg m^2
    let ixx = (effective_mass * p.beam * p.beam * 0.08).max(1.0);
    let iyy = (effective_mass * p.length * p.length * 0.08).max(1.0);

    let force_x = thrust - drag_surge; // N
    let force_y = -drag_sway - sway_linear + rudder.sway + hull_sway; // N, + to port
    // N m, + turns the bow counter-clockwise. Windage opposes the balance
    let moment_n = rudder.moment + hull_yaw - wind_yaw + yaw_damping(&p, k.r, shallow.yaw);

    // Body-frame accelerations with the centripetal cross terms
    let u_dot = force_x / mass_x + k.v * k.r;
    let v_dot = force_y / mass_y - k.u * k.r;
    let r_dot = moment_n / izz;

    // Waves, sampled at the pre-update position after advancing the phase clock
    let wave = resolve_wave(forcing, &p);
    state.wave.amplitude = wave.amplitude;
    state.wave.length = wave.length;
    state.wave.direction = wave.direction;
    state.wave.steepness = wave.steepness;
    state.wave.time += dt;
    let sample = sample_wave(&wave, state.kin.x, state.kin.y, state.wave.time);

    let k = &mut state.kin;

    // Heave spring-damper toward the ballast-scaled draft riding the wave
    let target_draft = neutral_draft(&p, effective_mass) * (0.7 + ballast * 0.5);
    let target_z = -(target_draft + sample.elevation); // m, z is up
    // Per unit mass (m/s^2), so stiffness is in 1/s^2 and damping in 1/s
    let heave_acc = (target_z - k.z) * p.heave_stiffness - p.heave_damping * k.w;
    k.w += heave_acc * dt;
    k.z += k.w * dt;

    // Roll follows the cross-slope, pitch the along-slope
    let roll_restoring = -GRAVITY * gm_roll(&p) * effective_mass * (k.roll - sample.slope_y);
    let pitch_restoring = -GRAVITY * gm_pitch(&p) * effective_mass * (k.pitch - sample.slope_x);
    let p_dot = roll_restoring / ixx - p.roll_damping * k.p; // rad/s^2
    let q_dot = pitch_restoring / iyy - p.pitch_damping * k.q;
    k.p += p_dot * dt;
    k.q += q_dot * dt;
    k.roll += k.p * dt;
    k.pitch += k.q * dt;

    k.u += u_dot * dt;
    k.v += v_dot * dt;
    k.r += r_dot * dt;

    // Sway capped at 60% of the surge cap
    let speed_cap = p.max_speed * MAX_SPEED_MULTIPLIER;
    k.u = clamp_signed(k.u, speed_cap);
    k.v = clamp_signed(k.v, speed_cap * 0.6);
    k.r = clamp_signed(k.r, MAX_YAW_RATE * MAX_YAW_MULTIPLIER);

    k.heading = normalize_angle(k.heading + k.r * dt); // rad from +x, counter-clockwise
    let world = body_to_world(k.heading, k.u, k.v);
    k.x += world.x * dt;
    k.y += world.y * dt;

    if let Some(d) = dbg {
        *d = VesselStepDebug {
            dt,
            effective_mass,
            throttle_effective: throttle,
            thrust,
            fuel_burn,
            u_rel,
            v_rel,
            shallow_t,
            drag_surge,
            drag_sway,
            sway_linear,
            wash_speed: rudder.wash_speed,
            inflow_speed: rudder.inflow_speed,
            alpha: rudder.alpha,
            stall_factor: rudder.stall_factor,
            rudder_sway: rudder.sway,
            rudder_moment: rudder.moment,
            hull_sway,
            hull_yaw,
            wind_yaw,
            force_x,
            force_y,
            moment_n,
            u_dot,
            v_dot,
            r_dot,
            wave_elevation: sample.elevation,
            wave_slope_x: sample.slope_x,
            wave_slope_y: sample.slope_y,
            target_z,
            roll_restoring,
            pitch_restoring,
        };
    }
}
