use std::f64::consts::TAU;

use bevy_math::DVec2;

/// Clamp into [0, 1].
#[inline]
pub fn clamp01(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else if value > 1.0 {
        1.0
    } else {
        value
    }
}

/// Clamp into [-limit, limit]. NaN passes through unchanged, callers filter it first.
#[inline]
pub fn clamp_signed(value: f64, limit: f64) -> f64 {
    if value > limit {
        limit
    } else if value < -limit {
        -limit
    } else {
        value
    }
}

/// Wrap an angle into [0, 2π).
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// `value` if it is finite and strictly positive, else `fallback`.
#[inline]
pub fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

#[inline]
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Rotate a heading-frame (surge, sway) pair into world (x, y).
/// Positive heading turns +x toward +y.
#[inline]
pub fn body_to_world(heading: f64, surge: f64, sway: f64) -> DVec2 {
    DVec2::from_angle(heading).rotate(DVec2::new(surge, sway))
}

/// Project a world-frame flow of `speed` toward `direction` onto the heading frame.
#[inline]
pub fn world_flow_to_body(heading: f64, speed: f64, direction: f64) -> DVec2 {
    DVec2::from_angle(direction - heading) * speed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn normalize_wraps_negative_and_large_angles() {
        assert!((normalize_angle(-FRAC_PI_2) - 1.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(5.0 * TAU + 0.25) - 0.25).abs() < 1e-9);
        assert_eq!(normalize_angle(TAU), 0.0);
        let tiny = normalize_angle(-1e-18);
        assert!((0.0..TAU).contains(&tiny), "tiny negative wrapped to {tiny}");
    }

    #[test]
    fn body_to_world_quarter_turn() {
        let w = body_to_world(FRAC_PI_2, 2.0, 0.0);
        assert!(w.x.abs() < 1e-12 && (w.y - 2.0).abs() < 1e-12, "{w:?}");
    }

    #[test]
    fn flow_from_ahead_is_pure_surge() {
        let b = world_flow_to_body(0.3, 1.5, 0.3);
        assert!((b.x - 1.5).abs() < 1e-12 && b.y.abs() < 1e-12, "{b:?}");
    }

    #[test]
    fn clamps() {
        assert_eq!(clamp01(-0.2), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp_signed(1.5, 0.6), 0.6);
        assert_eq!(clamp_signed(-2.0, 0.6), -0.6);
        assert_eq!(positive_or(-3.0, 7.0), 7.0);
        assert_eq!(positive_or(f64::INFINITY, 7.0), 7.0);
    }
}
