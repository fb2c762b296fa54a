use crate::math::{clamp01, clamp_signed};

use super::types::VesselState;

impl VesselState {
    /// Commanded throttle in [-1, 1]. The engine follows through its lag model.
    pub fn set_throttle(&mut self, command: f64) {
        if !command.is_finite() {
            return;
        }
        self.control.throttle_command = clamp_signed(command, 1.0);
    }

    /// Commanded rudder, clamped to the hull's max angle. The blade slews toward it.
    pub fn set_rudder_angle(&mut self, command: f64) {
        if !command.is_finite() {
            return;
        }
        self.control.rudder_command = clamp_signed(command, self.params.rudder_max_angle);
    }

    /// Ballast takes effect immediately, there is no pump model.
    pub fn set_ballast(&mut self, level: f64) {
        if !level.is_finite() {
            return;
        }
        self.control.ballast = clamp01(level);
    }

    pub fn set_body_velocity(&mut self, u: f64, v: f64, w: f64) {
        if u.is_finite() {
            self.kin.u = u;
        }
        if v.is_finite() {
            self.kin.v = v;
        }
        if w.is_finite() {
            self.kin.w = w;
        }
    }

    pub fn set_fuel_level(&mut self, level: f64) {
        if !level.is_finite() {
            return;
        }
        self.fuel.level = clamp01(level);
    }

    /// Re-clamp rudder command and blade after the max angle changed.
    pub(crate) fn reclamp_rudder(&mut self) {
        let max = self.params.rudder_max_angle;
        self.control.rudder_command = clamp_signed(self.control.rudder_command, max);
        self.control.rudder_angle = clamp_signed(self.control.rudder_angle, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_is_clamped_and_lagged() {
        let mut s = VesselState::default();
        s.set_throttle(3.0);
        assert_eq!(s.controls().throttle_command, 1.0);
        assert_eq!(s.controls().throttle, 0.0);
        s.set_throttle(-7.0);
        assert_eq!(s.controls().throttle_command, -1.0);
        s.set_throttle(f64::NAN);
        assert_eq!(s.controls().throttle_command, -1.0);
    }

    #[test]
    fn nan_rudder_is_ignored() {
        let mut s = VesselState::default();
        s.set_rudder_angle(0.3);
        s.set_rudder_angle(f64::NAN);
        assert_eq!(s.controls().rudder_command, 0.3);
    }

    #[test]
    fn ballast_and_fuel_clamp() {
        let mut s = VesselState::default();
        s.set_ballast(1.4);
        assert_eq!(s.controls().ballast, 1.0);
        s.set_ballast(-0.1);
        assert_eq!(s.controls().ballast, 0.0);
        s.set_fuel_level(2.0);
        assert_eq!(s.fuel().level, 1.0);
        s.set_fuel_level(f64::INFINITY);
        assert_eq!(s.fuel().level, 1.0);
    }
}
