mod types;
mod safety;
mod terms;
mod controls;
mod dynamics;
mod query;

pub use types::{
    ControlState, FuelState, Kinematics, StepOutcome, VesselSpawn, VesselState, VesselStepDebug,
    WaveScratch,
};
pub use safety::{clamp_dt, MAX_DT};
pub use dynamics::{step_vessel, step_vessel_dbg};
pub use query::{VesselSnapshot, RPM_AT_FULL_THROTTLE};
pub use terms::WATER_DENSITY;
