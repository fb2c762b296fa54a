use serde::{Deserialize, Serialize};

use crate::hull_specs::{HullTuning, VesselParams, DEFAULT_BALLAST, DEFAULT_FUEL_CONSUMPTION_RATE};
use crate::math::{clamp01, clamp_signed, finite_or, normalize_angle, positive_or};
use crate::param_abi::MODEL_DISPLACEMENT;

/// Pose and body-frame rates.
///
/// Frame conventions:
/// - World: +x east, +y north, z up. Heading 0 points along +x and grows toward +y.
/// - Body: u surge (forward), v sway (port positive), w heave.
/// - r yaw rate, p roll rate, q pitch rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Always in [0, 2π).
    pub heading: f64,
    pub roll: f64,
    pub pitch: f64,
    pub u: f64,
    pub v: f64,
    pub w: f64,
    pub r: f64,
    pub p: f64,
    pub q: f64,
}

impl Kinematics {
    pub(crate) fn is_finite(&self) -> bool {
        [
            self.x, self.y, self.z, self.heading, self.roll, self.pitch, self.u, self.v, self.w,
            self.r, self.p, self.q,
        ]
        .iter()
        .all(|c| c.is_finite())
    }
}

/// Commanded vs actual actuator values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub throttle_command: f64,
    /// Lagged engine response in [-1, 1].
    pub throttle: f64,
    pub rudder_command: f64,
    /// Rate-limited rudder deflection (rad).
    pub rudder_angle: f64,
    pub ballast: f64,
}

impl ControlState {
    pub(crate) fn is_finite(&self) -> bool {
        self.throttle_command.is_finite()
            && self.throttle.is_finite()
            && self.rudder_command.is_finite()
            && self.rudder_angle.is_finite()
            && self.ballast.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelState {
    /// Tank fraction in [0, 1].
    pub level: f64,
    pub consumption_rate: f64,
    /// Hourly burn rate of the last step, for display.
    pub last_consumption: f64,
}

impl FuelState {
    pub(crate) fn is_finite(&self) -> bool {
        self.level.is_finite()
            && self.consumption_rate.is_finite()
            && self.last_consumption.is_finite()
    }
}

/// Wave parameters resolved by the last step plus the vessel's own phase clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveScratch {
    pub amplitude: f64,
    pub length: f64,
    pub direction: f64,
    pub steepness: f64,
    pub time: f64,
}

impl WaveScratch {
    pub(crate) fn is_finite(&self) -> bool {
        self.amplitude.is_finite()
            && self.length.is_finite()
            && self.direction.is_finite()
            && self.steepness.is_finite()
            && self.time.is_finite()
    }
}

/// Construction arguments for a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselSpawn {
    pub kinematics: Kinematics,
    pub throttle: f64,
    pub rudder_angle: f64,
    pub mass: f64,
    pub length: f64,
    pub beam: f64,
    pub draft: f64,
    pub tuning: HullTuning,
}

impl Default for VesselSpawn {
    fn default() -> Self {
        let p = VesselParams::default();
        Self {
            kinematics: Kinematics::default(),
            throttle: 0.0,
            rudder_angle: 0.0,
            mass: p.mass,
            length: p.length,
            beam: p.beam,
            draft: p.draft,
            tuning: HullTuning::default(),
        }
    }
}

impl VesselSpawn {
    pub fn at(mut self, x: f64, y: f64, heading: f64) -> Self {
        self.kinematics.x = x;
        self.kinematics.y = y;
        self.kinematics.heading = heading;
        self
    }

    pub fn from_preset(preset: &crate::hull_specs::HullPreset) -> Self {
        Self {
            mass: preset.mass,
            length: preset.length,
            beam: preset.beam,
            draft: preset.draft,
            tuning: preset.tuning,
            ..Self::default()
        }
    }
}

/// One simulated vessel. Mutated only by the control setters, parameter
/// application and the integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselState {
    pub(crate) kin: Kinematics,
    pub(crate) control: ControlState,
    pub(crate) params: VesselParams,
    pub(crate) fuel: FuelState,
    pub(crate) wave: WaveScratch,
    pub(crate) model_id: i32,
}

impl VesselState {
    pub fn new(spawn: VesselSpawn) -> Self {
        let params = VesselParams::for_hull(
            spawn.mass,
            spawn.length,
            spawn.beam,
            spawn.draft,
            &spawn.tuning,
        );

        let k = spawn.kinematics;
        let kin = Kinematics {
            x: finite_or(k.x, 0.0),
            y: finite_or(k.y, 0.0),
            z: finite_or(k.z, 0.0),
            heading: normalize_angle(finite_or(k.heading, 0.0)),
            roll: finite_or(k.roll, 0.0),
            pitch: finite_or(k.pitch, 0.0),
            u: finite_or(k.u, 0.0),
            v: finite_or(k.v, 0.0),
            w: finite_or(k.w, 0.0),
            r: finite_or(k.r, 0.0),
            p: finite_or(k.p, 0.0),
            q: finite_or(k.q, 0.0),
        };

        let throttle = clamp_signed(finite_or(spawn.throttle, 0.0), 1.0);
        let rudder = clamp_signed(finite_or(spawn.rudder_angle, 0.0), params.rudder_max_angle);
        let ballast = spawn
            .tuning
            .ballast
            .map_or(DEFAULT_BALLAST, |b| clamp01(positive_or(b, DEFAULT_BALLAST)));

        Self {
            kin,
            control: ControlState {
                throttle_command: throttle,
                throttle,
                rudder_command: rudder,
                rudder_angle: rudder,
                ballast,
            },
            params,
            fuel: FuelState {
                level: 1.0,
                consumption_rate: spawn
                    .tuning
                    .fuel_consumption_rate
                    .map_or(DEFAULT_FUEL_CONSUMPTION_RATE, |r| {
                        positive_or(r, DEFAULT_FUEL_CONSUMPTION_RATE)
                    }),
                last_consumption: 0.0,
            },
            wave: WaveScratch::default(),
            model_id: MODEL_DISPLACEMENT,
        }
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kin
    }

    pub fn controls(&self) -> &ControlState {
        &self.control
    }

    pub fn params(&self) -> &VesselParams {
        &self.params
    }

    pub fn fuel(&self) -> &FuelState {
        &self.fuel
    }

    pub fn wave(&self) -> &WaveScratch {
        &self.wave
    }

    pub fn model_id(&self) -> i32 {
        self.model_id
    }
}

impl Default for VesselState {
    fn default() -> Self {
        Self::new(VesselSpawn::default())
    }
}

/// Result of one integration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced,
    /// Non-finite dt, state untouched.
    Skipped,
    /// The step produced non-finite state and was rolled back.
    Restored,
}

/// Force and moment breakdown of one step.
#[derive(Debug, Clone, Copy, Default)]
pub struct VesselStepDebug {
    pub dt: f64,
    pub effective_mass: f64,
    pub throttle_effective: f64,
    pub thrust: f64,
    pub fuel_burn: f64,
    // Water-relative body velocity
    pub u_rel: f64,
    pub v_rel: f64,
    pub shallow_t: f64,
    pub drag_surge: f64,
    pub drag_sway: f64,
    pub sway_linear: f64,
    // Rudder
    pub wash_speed: f64,
    pub inflow_speed: f64,
    pub alpha: f64,
    pub stall_factor: f64,
    pub rudder_sway: f64,
    pub rudder_moment: f64,
    pub hull_sway: f64,
    pub hull_yaw: f64,
    pub wind_yaw: f64,
    // Totals
    pub force_x: f64,
    pub force_y: f64,
    pub moment_n: f64,
    pub u_dot: f64,
    pub v_dot: f64,
    pub r_dot: f64,
    // Seakeeping
    pub wave_elevation: f64,
    pub wave_slope_x: f64,
    pub wave_slope_y: f64,
    pub target_z: f64,
    pub roll_restoring: f64,
    pub pitch_restoring: f64,
}
