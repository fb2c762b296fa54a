//! Read-only derived quantities. The stability figures are display proxies,
//! not a hydrostatics solver.
use serde::{Deserialize, Serialize};

use super::terms::wave_phase;
use super::types::VesselState;

pub const RPM_AT_FULL_THROTTLE: f64 = 1200.0;

impl VesselState {
    /// Horizontal speed through the hull frame, `hypot(u, v)`.
    pub fn speed(&self) -> f64 {
        self.kin.u.hypot(self.kin.v)
    }

    pub fn engine_rpm(&self) -> f64 {
        self.control.throttle.abs() * RPM_AT_FULL_THROTTLE
    }

    /// Approximate metacentric height. Ballast lowers the centre of gravity,
    /// so GM grows with it; at the default ballast of 0.5 the factor is 1.
    pub fn metacentric_height(&self) -> f64 {
        let p = &self.params;
        p.beam * p.block_coefficient / (p.draft + 0.1) * (0.9 + 0.2 * self.control.ballast)
    }

    pub fn center_of_gravity_height(&self) -> f64 {
        self.params.draft * (0.4 + self.control.ballast * 0.2)
    }

    /// Phase of the vessel's wave field at its position on its own clock.
    pub fn wave_phase(&self) -> f64 {
        let w = &self.wave;
        if w.length <= 0.0 {
            return 0.0;
        }
        let k = std::f64::consts::TAU / w.length;
        let omega = (crate::sea_state::GRAVITY * k).sqrt();
        wave_phase(k, omega, w.direction, self.kin.x, self.kin.y, w.time)
    }

    pub fn wave_elevation(&self) -> f64 {
        self.wave.amplitude * self.wave_phase().sin()
    }

    pub fn snapshot(&self) -> VesselSnapshot {
        let k = &self.kin;
        VesselSnapshot {
            x: k.x,
            y: k.y,
            z: k.z,
            heading: k.heading,
            roll: k.roll,
            pitch: k.pitch,
            surge: k.u,
            sway: k.v,
            heave: k.w,
            yaw_rate: k.r,
            roll_rate: k.p,
            pitch_rate: k.q,
            speed: self.speed(),
            rudder_angle: self.control.rudder_angle,
            throttle: self.control.throttle,
            engine_rpm: self.engine_rpm(),
            ballast: self.control.ballast,
            fuel_level: self.fuel.level,
            fuel_consumption: self.fuel.last_consumption,
            metacentric_height: self.metacentric_height(),
            center_of_gravity_height: self.center_of_gravity_height(),
            wave_elevation: self.wave_elevation(),
        }
    }
}

/// Flat copy of everything a presentation or network layer reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselSnapshot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub heading: f64,
    pub roll: f64,
    pub pitch: f64,
    pub surge: f64,
    pub sway: f64,
    pub heave: f64,
    pub yaw_rate: f64,
    pub roll_rate: f64,
    pub pitch_rate: f64,
    pub speed: f64,
    pub rudder_angle: f64,
    pub throttle: f64,
    pub engine_rpm: f64,
    pub ballast: f64,
    pub fuel_level: f64,
    pub fuel_consumption: f64,
    pub metacentric_height: f64,
    pub center_of_gravity_height: f64,
    pub wave_elevation: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vessel_physics::VesselSpawn;

    #[test]
    fn gm_at_default_ballast_is_plain_formula() {
        let s = VesselState::default();
        let p = s.params();
        let plain = p.beam * p.block_coefficient / (p.draft + 0.1);
        assert!((s.metacentric_height() - plain).abs() < 1e-12);
    }

    #[test]
    fn speed_and_cg() {
        let mut spawn = VesselSpawn::default();
        spawn.kinematics.u = 3.0;
        spawn.kinematics.v = 4.0;
        let s = VesselState::new(spawn);
        assert_eq!(s.speed(), 5.0);
        assert!((s.center_of_gravity_height() - 6.0 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn fresh_vessel_has_flat_wave() {
        let s = VesselState::default();
        assert_eq!(s.wave_phase(), 0.0);
        assert_eq!(s.wave_elevation(), 0.0);
        assert_eq!(s.snapshot().engine_rpm, 0.0);
    }
}
