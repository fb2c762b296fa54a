//! Stateless sea-state forcing: Beaufort category, wave tables and the
//! travelling sine wave field.
use std::f64::consts::TAU;

pub const GRAVITY: f64 = 9.81;
pub const MAX_SEA_STATE: f64 = 12.0;
/// Below this sea state the wave field is flat.
pub const CALM_SEA_STATE: f64 = 0.5;

const BEAUFORT_THRESHOLDS: [f64; 12] = [
    0.2, 1.5, 3.3, 5.4, 7.9, 10.7, 13.8, 17.1, 20.7, 24.4, 28.4, 32.6,
];

const WAVE_HEIGHT_TABLE: [f64; 13] = [
    0.0, 0.1, 0.2, 0.6, 1.0, 2.0, 3.0, 4.0, 5.5, 7.0, 9.0, 11.5, 14.0,
];

fn clamp_sea_state(sea_state: f64) -> f64 {
    if sea_state.is_nan() {
        return 0.0;
    }
    sea_state.clamp(0.0, MAX_SEA_STATE)
}

/// Wind speed (m/s) to Beaufort category 0..=12.
pub fn beaufort_scale(wind_speed: f64) -> u8 {
    BEAUFORT_THRESHOLDS
        .iter()
        .take_while(|&&t| wind_speed >= t)
        .count() as u8
}

/// Continuous sea state from wind, `wind / 1.5` clamped to [0, 12].
pub fn sea_state_from_wind(wind_speed: f64) -> f64 {
    clamp_sea_state(wind_speed / 1.5)
}

/// Significant wave height from the lookup table. Fractional states truncate
/// to the row below; anything under [`CALM_SEA_STATE`] is flat.
pub fn wave_height_for_sea_state(sea_state: f64) -> f64 {
    if sea_state.is_nan() || sea_state < CALM_SEA_STATE {
        return 0.0;
    }
    let idx = clamp_sea_state(sea_state).floor() as usize;
    WAVE_HEIGHT_TABLE[idx.min(WAVE_HEIGHT_TABLE.len() - 1)]
}

/// Linear ambience variant, half a metre per state.
pub fn nominal_wave_height(sea_state: f64) -> f64 {
    clamp_sea_state(sea_state) * 0.5
}

pub fn wave_period(sea_state: f64) -> f64 {
    3.0 + 1.6 * clamp_sea_state(sea_state)
}

/// Deep-water dispersion: L = g·T²/2π.
pub fn wave_length(sea_state: f64) -> f64 {
    let period = wave_period(sea_state);
    GRAVITY * period * period / TAU
}

/// Angular frequency ω = 2π/T.
pub fn wave_frequency(sea_state: f64) -> f64 {
    TAU / wave_period(sea_state)
}

/// Surface elevation of a travelling sine wave at world (x, y) and time `t`.
///
/// `height` is crest-to-trough, so the amplitude is half of it. Flat below
/// [`CALM_SEA_STATE`] and whenever the inputs cannot describe a wave.
#[allow(clippy::too_many_arguments)]
pub fn wave_height_at(
    x: f64,
    y: f64,
    time: f64,
    height: f64,
    length: f64,
    frequency: f64,
    direction: f64,
    sea_state: f64,
) -> f64 {
    let calm = sea_state.is_nan() || sea_state < CALM_SEA_STATE;
    if calm || length.is_nan() || length <= 0.0 {
        return 0.0;
    }
    let amplitude = height * 0.5;
    let k = TAU / length;
    let phase = k * (x * direction.cos() + y * direction.sin()) - frequency * time;
    let elevation = amplitude * phase.sin();
    if elevation.is_finite() {
        elevation
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beaufort_boundaries() {
        assert_eq!(beaufort_scale(0.0), 0);
        assert_eq!(beaufort_scale(0.19), 0);
        assert_eq!(beaufort_scale(0.2), 1);
        assert_eq!(beaufort_scale(15.0), 7);
        assert_eq!(beaufort_scale(32.6), 12);
        assert_eq!(beaufort_scale(35.0), 12);
        assert_eq!(beaufort_scale(-4.0), 0);
        assert_eq!(beaufort_scale(f64::NAN), 0);
    }

    #[test]
    fn period_length_frequency_agree() {
        let s = 4.0;
        let t = wave_period(s);
        assert!((t - 9.4).abs() < 1e-12);
        assert!((wave_frequency(s) * t - TAU).abs() < 1e-12);
        assert!((wave_length(s) - GRAVITY * t * t / TAU).abs() < 1e-9);
    }

    #[test]
    fn calm_sea_is_flat_everywhere() {
        for &(x, y, t) in &[(0.0, 0.0, 0.0), (13.0, -4.0, 7.5), (1e4, 2e3, 99.0)] {
            assert_eq!(wave_height_at(x, y, t, 2.0, 50.0, 1.1, 0.3, 0.4), 0.0);
        }
    }

    #[test]
    fn rough_sea_stays_within_amplitude() {
        let mut saw_motion = false;
        for i in 0..50 {
            let e = wave_height_at(i as f64 * 3.1, 0.0, i as f64 * 0.4, 4.0, 60.0, 1.0, 0.0, 6.0);
            assert!(e.abs() <= 2.0 + 1e-12, "elevation {e}");
            saw_motion |= e.abs() > 1e-3;
        }
        assert!(saw_motion);
    }

    #[test]
    fn nan_sea_state_is_calm() {
        assert_eq!(wave_height_for_sea_state(f64::NAN), 0.0);
        assert_eq!(nominal_wave_height(f64::NAN), 0.0);
        assert_eq!(sea_state_from_wind(f64::NAN), 0.0);
    }
}
