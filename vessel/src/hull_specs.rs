use serde::{Deserialize, Serialize};

use crate::math::positive_or;

pub const DEFAULT_MASS: f64 = 5.0e6;
pub const DEFAULT_LENGTH: f64 = 120.0;
pub const DEFAULT_BEAM: f64 = 20.0;
pub const DEFAULT_DRAFT: f64 = 6.0;
pub const DEFAULT_BLOCK_COEFFICIENT: f64 = 0.75;
pub const DEFAULT_RUDDER_FORCE_COEFFICIENT: f64 = 200_000.0;
pub const DEFAULT_RUDDER_STALL_ANGLE: f64 = 0.5;
pub const DEFAULT_RUDDER_MAX_ANGLE: f64 = 0.6;
pub const DEFAULT_DRAG_COEFFICIENT: f64 = 0.8;
pub const DEFAULT_YAW_DAMPING: f64 = 0.5;
pub const DEFAULT_YAW_DAMPING_QUAD: f64 = 1.2;
pub const DEFAULT_SWAY_DAMPING: f64 = 0.6;
pub const DEFAULT_MAX_THRUST: f64 = 8.0e5;
pub const DEFAULT_MAX_SPEED: f64 = 15.0;
pub const DEFAULT_ROLL_DAMPING: f64 = 0.8;
pub const DEFAULT_PITCH_DAMPING: f64 = 0.6;
pub const DEFAULT_HEAVE_STIFFNESS: f64 = 2.0;
pub const DEFAULT_HEAVE_DAMPING: f64 = 1.6;
pub const DEFAULT_RUDDER_AREA_RATIO: f64 = 0.02;
pub const DEFAULT_RUDDER_ARM_RATIO: f64 = 0.45;
pub const DEFAULT_RUDDER_LIFT_SLOPE: f64 = 6.0;
pub const DEFAULT_PROP_WASH: f64 = 0.6;
pub const DEFAULT_ENGINE_TIME_CONSTANT: f64 = 2.5;
pub const DEFAULT_RUDDER_RATE: f64 = 0.25;
pub const DEFAULT_ADDED_MASS_X_COEFF: f64 = 0.05;
pub const DEFAULT_ADDED_MASS_Y_COEFF: f64 = 0.2;
pub const DEFAULT_ADDED_MASS_YAW_COEFF: f64 = 0.02;
pub const DEFAULT_SHALLOW_WATER_FACTOR: f64 = 1.5;
pub const DEFAULT_SHALLOW_WATER_YAW_FACTOR: f64 = 1.4;
pub const DEFAULT_SHALLOW_WATER_RUDDER_FACTOR: f64 = 0.7;
/// Fraction of a full tank burned per second at full throttle.
pub const DEFAULT_FUEL_CONSUMPTION_RATE: f64 = 0.000015;
pub const DEFAULT_BALLAST: f64 = 0.5;

/// Tuned hydrodynamic, rudder and engine coefficients for one hull.
///
/// Field order follows the flat parameter ABI (see [`crate::param_abi`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselParams {
    pub mass: f64,
    pub length: f64,
    pub beam: f64,
    pub draft: f64,
    pub block_coefficient: f64,
    pub rudder_force_coefficient: f64,
    pub rudder_stall_angle: f64,
    pub rudder_max_angle: f64,
    pub drag_coefficient: f64,
    pub yaw_damping: f64,
    pub yaw_damping_quad: f64,
    pub sway_damping: f64,
    pub max_thrust: f64,
    pub max_speed: f64,
    pub roll_damping: f64,
    pub pitch_damping: f64,
    pub heave_stiffness: f64,
    pub heave_damping: f64,
    pub rudder_area: f64,
    pub rudder_arm: f64,
    pub rudder_lift_slope: f64,
    pub prop_wash_factor: f64,
    pub engine_time_constant: f64,
    pub rudder_rate_limit: f64,
    pub added_mass_x: f64,
    pub added_mass_y: f64,
    pub added_mass_yaw: f64,
    // Linear hull cross-coupling derivatives, zero unless tuned.
    pub hull_yv: f64,
    pub hull_yr: f64,
    pub hull_nv: f64,
    pub hull_nr: f64,
    pub cd_surge: f64,
    pub cd_sway: f64,
    pub cd_yaw: f64,
    pub shallow_water_factor: f64,
    pub shallow_water_yaw_factor: f64,
    pub shallow_water_rudder_factor: f64,
}

/// Optional construction-time overrides. Anything missing, non-finite or
/// non-positive falls back to the documented default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullTuning {
    pub block_coefficient: Option<f64>,
    pub rudder_force_coefficient: Option<f64>,
    pub rudder_stall_angle: Option<f64>,
    pub rudder_max_angle: Option<f64>,
    pub drag_coefficient: Option<f64>,
    pub yaw_damping: Option<f64>,
    pub yaw_damping_quad: Option<f64>,
    pub sway_damping: Option<f64>,
    pub max_thrust: Option<f64>,
    pub max_speed: Option<f64>,
    pub roll_damping: Option<f64>,
    pub pitch_damping: Option<f64>,
    pub heave_stiffness: Option<f64>,
    pub heave_damping: Option<f64>,
    pub rudder_area: Option<f64>,
    pub rudder_arm: Option<f64>,
    pub rudder_lift_slope: Option<f64>,
    pub prop_wash_factor: Option<f64>,
    pub engine_time_constant: Option<f64>,
    pub rudder_rate_limit: Option<f64>,
    pub fuel_consumption_rate: Option<f64>,
    pub ballast: Option<f64>,
}

fn pick(value: Option<f64>, fallback: f64) -> f64 {
    value.map_or(fallback, |v| positive_or(v, fallback))
}

impl VesselParams {
    /// Derive a full coefficient set from principal dimensions plus overrides.
    pub fn for_hull(mass: f64, length: f64, beam: f64, draft: f64, tuning: &HullTuning) -> Self {
        let mass = positive_or(mass, DEFAULT_MASS);
        let length = positive_or(length, DEFAULT_LENGTH);
        let beam = positive_or(beam, DEFAULT_BEAM);
        let draft = positive_or(draft, DEFAULT_DRAFT);
        let drag_coefficient = pick(tuning.drag_coefficient, DEFAULT_DRAG_COEFFICIENT);

        Self {
            mass,
            length,
            beam,
            draft,
            block_coefficient: pick(tuning.block_coefficient, DEFAULT_BLOCK_COEFFICIENT),
            rudder_force_coefficient: pick(
                tuning.rudder_force_coefficient,
                DEFAULT_RUDDER_FORCE_COEFFICIENT,
            ),
            rudder_stall_angle: pick(tuning.rudder_stall_angle, DEFAULT_RUDDER_STALL_ANGLE),
            rudder_max_angle: pick(tuning.rudder_max_angle, DEFAULT_RUDDER_MAX_ANGLE),
            drag_coefficient,
            yaw_damping: pick(tuning.yaw_damping, DEFAULT_YAW_DAMPING),
            yaw_damping_quad: pick(tuning.yaw_damping_quad, DEFAULT_YAW_DAMPING_QUAD),
            sway_damping: pick(tuning.sway_damping, DEFAULT_SWAY_DAMPING),
            max_thrust: pick(tuning.max_thrust, DEFAULT_MAX_THRUST),
            max_speed: pick(tuning.max_speed, DEFAULT_MAX_SPEED),
            roll_damping: pick(tuning.roll_damping, DEFAULT_ROLL_DAMPING),
            pitch_damping: pick(tuning.pitch_damping, DEFAULT_PITCH_DAMPING),
            heave_stiffness: pick(tuning.heave_stiffness, DEFAULT_HEAVE_STIFFNESS),
            heave_damping: pick(tuning.heave_damping, DEFAULT_HEAVE_DAMPING),
            rudder_area: pick(
                tuning.rudder_area,
                (DEFAULT_RUDDER_AREA_RATIO * length * draft).max(0.1),
            ),
            rudder_arm: pick(tuning.rudder_arm, DEFAULT_RUDDER_ARM_RATIO * length),
            rudder_lift_slope: pick(tuning.rudder_lift_slope, DEFAULT_RUDDER_LIFT_SLOPE),
            prop_wash_factor: pick(tuning.prop_wash_factor, DEFAULT_PROP_WASH),
            engine_time_constant: pick(tuning.engine_time_constant, DEFAULT_ENGINE_TIME_CONSTANT),
            rudder_rate_limit: pick(tuning.rudder_rate_limit, DEFAULT_RUDDER_RATE),
            added_mass_x: mass * DEFAULT_ADDED_MASS_X_COEFF,
            added_mass_y: mass * DEFAULT_ADDED_MASS_Y_COEFF,
            added_mass_yaw: mass * length * length * 0.1 * DEFAULT_ADDED_MASS_YAW_COEFF,
            hull_yv: 0.0,
            hull_yr: 0.0,
            hull_nv: 0.0,
            hull_nr: 0.0,
            cd_surge: drag_coefficient,
            cd_sway: drag_coefficient * 1.2,
            cd_yaw: drag_coefficient * 0.3,
            shallow_water_factor: DEFAULT_SHALLOW_WATER_FACTOR,
            shallow_water_yaw_factor: DEFAULT_SHALLOW_WATER_YAW_FACTOR,
            shallow_water_rudder_factor: DEFAULT_SHALLOW_WATER_RUDDER_FACTOR,
        }
    }
}

impl Default for VesselParams {
    fn default() -> Self {
        Self::for_hull(
            DEFAULT_MASS,
            DEFAULT_LENGTH,
            DEFAULT_BEAM,
            DEFAULT_DRAFT,
            &HullTuning::default(),
        )
    }
}

/// Principal dimensions plus tuning for a named ship type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullPreset {
    pub mass: f64,
    pub length: f64,
    pub beam: f64,
    pub draft: f64,
    pub tuning: HullTuning,
}

impl HullPreset {
    pub fn params(&self) -> VesselParams {
        VesselParams::for_hull(self.mass, self.length, self.beam, self.draft, &self.tuning)
    }
}

pub mod hullspecs {
    use super::*;

    const KNOT: f64 = 0.514444;

    pub fn default_hull() -> HullPreset {
        HullPreset {
            mass: DEFAULT_MASS,
            length: DEFAULT_LENGTH,
            beam: DEFAULT_BEAM,
            draft: DEFAULT_DRAFT,
            tuning: HullTuning::default(),
        }
    }

    // Feeder-class box ship, 23 kn service speed
    pub fn container_ship() -> HullPreset {
        HullPreset {
            mass: 14_950_000.0,
            length: 212.0,
            beam: 28.0,
            draft: 9.1,
            tuning: HullTuning {
                block_coefficient: Some(0.8),
                drag_coefficient: Some(0.85),
                yaw_damping: Some(0.6),
                sway_damping: Some(0.65),
                max_thrust: Some(DEFAULT_MAX_THRUST * 1.05),
                max_speed: Some(23.0 * KNOT),
                ..HullTuning::default()
            },
        }
    }

    pub fn tanker() -> HullPreset {
        HullPreset {
            mass: 42_000_000.0,
            length: 245.0,
            beam: 42.0,
            draft: 14.5,
            tuning: HullTuning {
                block_coefficient: Some(0.84),
                drag_coefficient: Some(0.95),
                yaw_damping: Some(0.7),
                sway_damping: Some(0.8),
                max_thrust: Some(DEFAULT_MAX_THRUST * 1.1),
                max_speed: Some(15.0 * KNOT),
                engine_time_constant: Some(4.0),
                ..HullTuning::default()
            },
        }
    }

    pub fn cargo_ship() -> HullPreset {
        HullPreset {
            mass: 9_800_000.0,
            length: 160.0,
            beam: 24.0,
            draft: 8.2,
            tuning: HullTuning {
                block_coefficient: Some(0.72),
                drag_coefficient: Some(0.75),
                yaw_damping: Some(0.45),
                sway_damping: Some(0.55),
                max_thrust: Some(DEFAULT_MAX_THRUST * 0.95),
                max_speed: Some(18.0 * KNOT),
                ..HullTuning::default()
            },
        }
    }

    // Small, overpowered, quick rudder
    pub fn harbor_tug() -> HullPreset {
        HullPreset {
            mass: 450_000.0,
            length: 32.0,
            beam: 11.0,
            draft: 4.5,
            tuning: HullTuning {
                block_coefficient: Some(0.55),
                max_thrust: Some(6.5e5),
                max_speed: Some(13.0 * KNOT),
                rudder_max_angle: Some(0.75),
                rudder_rate_limit: Some(0.6),
                engine_time_constant: Some(1.2),
                fuel_consumption_rate: Some(0.00004),
                ..HullTuning::default()
            },
        }
    }

    pub fn by_name(name: &str) -> Option<HullPreset> {
        match name {
            "default" => Some(default_hull()),
            "container" => Some(container_ship()),
            "tanker" => Some(tanker()),
            "cargo" => Some(cargo_ship()),
            "tug" => Some(harbor_tug()),
            _ => None,
        }
    }

    pub const NAMES: [&str; 5] = ["default", "container", "tanker", "cargo", "tug"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_dimensions_fall_back() {
        let p = VesselParams::for_hull(-1.0, 0.0, f64::NAN, -6.0, &HullTuning::default());
        assert_eq!(p.mass, DEFAULT_MASS);
        assert_eq!(p.length, DEFAULT_LENGTH);
        assert_eq!(p.beam, DEFAULT_BEAM);
        assert_eq!(p.draft, DEFAULT_DRAFT);
    }

    #[test]
    fn derived_rudder_and_added_mass() {
        let p = VesselParams::default();
        assert!((p.rudder_area - 0.02 * 120.0 * 6.0).abs() < 1e-12);
        assert!((p.rudder_arm - 54.0).abs() < 1e-12);
        assert!((p.added_mass_y - 0.2 * DEFAULT_MASS).abs() < 1e-6);
        assert!((p.cd_sway - 0.96).abs() < 1e-12);
    }

    #[test]
    fn rejected_overrides_keep_defaults() {
        let tuning = HullTuning {
            rudder_max_angle: Some(-0.3),
            max_speed: Some(0.0),
            engine_time_constant: Some(0.7),
            ..HullTuning::default()
        };
        let p = VesselParams::for_hull(1.0e6, 80.0, 14.0, 5.0, &tuning);
        assert_eq!(p.rudder_max_angle, DEFAULT_RUDDER_MAX_ANGLE);
        assert_eq!(p.max_speed, DEFAULT_MAX_SPEED);
        assert_eq!(p.engine_time_constant, 0.7);
    }

    #[test]
    fn every_preset_resolves_by_name() {
        for name in hullspecs::NAMES {
            let preset = hullspecs::by_name(name).expect("preset");
            assert!(preset.params().mass > 0.0, "{name}");
        }
        assert!(hullspecs::by_name("dinghy").is_none());
    }
}
