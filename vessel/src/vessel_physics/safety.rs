use crate::environment::Forcing;

use super::types::{ControlState, FuelState, Kinematics, VesselState, WaveScratch};

pub const MAX_DT: f64 = 0.25;

/// `None` for a non-finite step, else dt clamped to [0, MAX_DT].
pub fn clamp_dt(dt: f64) -> Option<f64> {
    if !dt.is_finite() {
        return None;
    }
    Some(dt.clamp(0.0, MAX_DT))
}

/// Forcing with every scalar made safe to feed into the force terms.
#[derive(Debug, Clone, Copy)]
pub(super) struct SanitizedForcing {
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub current_speed: f64,
    pub current_direction: f64,
    pub wave_height: Option<f64>,
    pub wave_length: Option<f64>,
    pub wave_direction: Option<f64>,
    pub wave_steepness: Option<f64>,
    pub water_depth: Option<f64>,
}

fn speed(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn angle(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl SanitizedForcing {
    pub fn from_forcing(f: &Forcing) -> Self {
        Self {
            wind_speed: speed(f.wind_speed),
            wind_direction: angle(f.wind_direction),
            current_speed: speed(f.current_speed),
            current_direction: angle(f.current_direction),
            wave_height: f.wave.height.filter(|h| h.is_finite() && *h > 0.0),
            wave_length: f.wave.length.filter(|l| l.is_finite() && *l > 1.0),
            wave_direction: f.wave.direction.filter(|d| d.is_finite()),
            wave_steepness: f.wave.steepness.filter(|s| s.is_finite() && *s > 0.0),
            water_depth: f.water_depth.filter(|d| d.is_finite() && *d > 0.0),
        }
    }
}

/// Last-good copy of everything a step mutates.
#[derive(Debug, Clone, Copy)]
pub(super) struct Checkpoint {
    kin: Kinematics,
    control: ControlState,
    fuel: FuelState,
    wave: WaveScratch,
}

impl Checkpoint {
    pub fn capture(state: &VesselState) -> Self {
        Self {
            kin: state.kin,
            control: state.control,
            fuel: state.fuel,
            wave: state.wave,
        }
    }

    pub fn restore(self, state: &mut VesselState) {
        state.kin = self.kin;
        state.control = self.control;
        state.fuel = self.fuel;
        state.wave = self.wave;
    }
}

pub(super) fn state_is_finite(state: &VesselState) -> bool {
    state.kin.is_finite()
        && state.control.is_finite()
        && state.fuel.is_finite()
        && state.wave.is_finite()
}
