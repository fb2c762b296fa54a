//! Ship dynamics engine.
//!
//! Pure computation: a fixed-step integrator for one or many surface vessels
//! under thrust, rudder, hull hydrodynamics, wind, current, waves and
//! shallow water. No I/O and no ECS types, so any host can drive it.

pub mod math;

pub mod hull_specs;
pub use hull_specs::{HullPreset, HullTuning, VesselParams};
pub use hull_specs::hullspecs;

pub mod sea_state;
pub use sea_state::{
    beaufort_scale, nominal_wave_height, sea_state_from_wind, wave_frequency, wave_height_at,
    wave_height_for_sea_state, wave_length, wave_period,
};

mod environment;
pub use environment::{EnvironmentState, Forcing, WaveInput};

pub mod param_abi;
pub use param_abi::{apply_vessel_params, param_index};

pub mod vessel_physics;
pub use vessel_physics::{
    clamp_dt, step_vessel, step_vessel_dbg, Kinematics, StepOutcome, VesselSnapshot,
    VesselSpawn, VesselState, VesselStepDebug,
};

mod fleet;
pub use fleet::{AllocationMode, Fleet, StepSummary, VesselError, VesselId};
