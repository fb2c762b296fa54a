use serde::{Deserialize, Serialize};

use crate::param_abi::{
    ENVIRONMENT_BUFFER_CAPACITY, ENV_CURRENT_DIRECTION, ENV_CURRENT_SPEED, ENV_WATER_DEPTH,
    ENV_WAVE_DIRECTION, ENV_WAVE_HEIGHT, ENV_WAVE_LENGTH, ENV_WAVE_STEEPNESS, ENV_WIND_DIRECTION,
    ENV_WIND_SPEED,
};
use crate::sea_state::{sea_state_from_wind, wave_height_for_sea_state, wave_length};

/// Explicit wave parameters. `None` means "derive from wind" inside the step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveInput {
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub direction: Option<f64>,
    pub steepness: Option<f64>,
}

impl WaveInput {
    /// Table-driven wave for a sea state travelling toward `direction`.
    /// A flat sea yields an all-`None` input.
    pub fn for_sea_state(sea_state: f64, direction: f64) -> Self {
        let height = wave_height_for_sea_state(sea_state);
        if height <= 0.0 {
            return Self::default();
        }
        let length = wave_length(sea_state);
        let k = std::f64::consts::TAU / length;
        Self {
            height: Some(height),
            length: Some(length),
            direction: direction.is_finite().then_some(direction),
            steepness: Some((0.5 * height * k).min(0.7)),
        }
    }

    pub fn for_wind(wind_speed: f64, direction: f64) -> Self {
        Self::for_sea_state(sea_state_from_wind(wind_speed), direction)
    }
}

/// Per-step forcing handed to the integrator. Directions are the heading the
/// wind, current or wave travels toward, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Forcing {
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub current_speed: f64,
    pub current_direction: f64,
    pub wave: WaveInput,
    pub water_depth: Option<f64>,
}

impl Forcing {
    pub fn calm() -> Self {
        Self::default()
    }

    pub fn with_wind(mut self, speed: f64, direction: f64) -> Self {
        self.wind_speed = speed;
        self.wind_direction = direction;
        self
    }

    pub fn with_current(mut self, speed: f64, direction: f64) -> Self {
        self.current_speed = speed;
        self.current_direction = direction;
        self
    }

    pub fn with_wave(mut self, wave: WaveInput) -> Self {
        self.wave = wave;
        self
    }

    pub fn with_depth(mut self, depth: f64) -> Self {
        self.water_depth = Some(depth);
        self
    }
}

/// Scene-wide forcing record owned by the simulation loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentState {
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub current_speed: f64,
    pub current_direction: f64,
    pub wave_height: f64,
    pub wave_length: f64,
    pub wave_direction: f64,
    pub wave_steepness: f64,
    /// Zero means deep water.
    pub water_depth: f64,
}

fn present(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

impl EnvironmentState {
    /// Convert to integrator forcing. Unset (non-positive) wave fields become
    /// `None`; the wave direction only counts once a wave height is set.
    pub fn forcing(&self) -> Forcing {
        let height = present(self.wave_height);
        let direction = height
            .and(Some(self.wave_direction))
            .filter(|d| d.is_finite());
        Forcing {
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            current_speed: self.current_speed,
            current_direction: self.current_direction,
            wave: WaveInput {
                height,
                length: present(self.wave_length),
                direction,
                steepness: present(self.wave_steepness),
            },
            water_depth: present(self.water_depth),
        }
    }

    /// Overwrite wave fields from a sea state, keeping wind and current.
    pub fn apply_sea_state(&mut self, sea_state: f64) {
        let wave = WaveInput::for_sea_state(sea_state, self.wind_direction);
        self.wave_height = wave.height.unwrap_or(0.0);
        self.wave_length = wave.length.unwrap_or(0.0);
        self.wave_direction = wave.direction.unwrap_or(self.wind_direction);
        self.wave_steepness = wave.steepness.unwrap_or(0.0);
    }

    /// Apply the flat environment ABI. Finite entries at known indices win,
    /// everything else keeps its previous value. Returns how many were taken.
    pub fn apply_buffer(&mut self, values: &[f64]) -> usize {
        let len = values.len().min(ENVIRONMENT_BUFFER_CAPACITY);
        let mut accepted = 0;
        for (index, &value) in values[..len].iter().enumerate() {
            if !value.is_finite() {
                continue;
            }
            let Some(field) = self.field_mut(index) else {
                continue;
            };
            *field = value;
            accepted += 1;
        }
        accepted
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut f64> {
        Some(match index {
            ENV_WIND_SPEED => &mut self.wind_speed,
            ENV_WIND_DIRECTION => &mut self.wind_direction,
            ENV_CURRENT_SPEED => &mut self.current_speed,
            ENV_CURRENT_DIRECTION => &mut self.current_direction,
            ENV_WAVE_HEIGHT => &mut self.wave_height,
            ENV_WAVE_LENGTH => &mut self.wave_length,
            ENV_WAVE_DIRECTION => &mut self.wave_direction,
            ENV_WAVE_STEEPNESS => &mut self.wave_steepness,
            ENV_WATER_DEPTH => &mut self.water_depth,
            _ => return None,
        })
    }
}
