//! Generational arena owning every live vessel.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::environment::Forcing;
use crate::param_abi::{apply_vessel_params, VESSEL_PARAM_BUFFER_CAPACITY};
use crate::vessel_physics::{step_vessel, StepOutcome, VesselSpawn, VesselState};

/// Opaque handle. A destroyed vessel's handle goes stale, it never aliases a
/// later vessel placed in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VesselId {
    pub index: u32,
    pub generation: u32,
}

impl std::fmt::Display for VesselId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VesselError {
    #[error("unknown vessel {0}")]
    UnknownVessel(VesselId),
    #[error("stale vessel handle {0}")]
    StaleHandle(VesselId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationMode {
    /// Every create allocates a fresh vessel.
    #[default]
    AlwaysNew,
    /// At most one live vessel. Creating while it lives returns the existing
    /// handle and ignores the arguments.
    SingleSlot,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    vessel: Option<VesselState>,
}

/// Per-tick counts from [`Fleet::step_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub advanced: usize,
    pub skipped: usize,
    pub restored: usize,
}

#[derive(Debug)]
pub struct Fleet {
    slots: Vec<Slot>,
    free: Vec<u32>,
    mode: AllocationMode,
    param_buffer: [f64; VESSEL_PARAM_BUFFER_CAPACITY],
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new(AllocationMode::default())
    }
}

impl Fleet {
    pub fn new(mode: AllocationMode) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            mode,
            param_buffer: [0.0; VESSEL_PARAM_BUFFER_CAPACITY],
        }
    }

    pub fn mode(&self) -> AllocationMode {
        self.mode
    }

    pub fn create(&mut self, spawn: VesselSpawn) -> VesselId {
        if self.mode == AllocationMode::SingleSlot {
            if let Some((id, _)) = self.iter().next() {
                return id;
            }
        }
        let vessel = VesselState::new(spawn);
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.vessel = Some(vessel);
                VesselId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    vessel: Some(vessel),
                });
                VesselId {
                    index,
                    generation: 0,
                }
            }
        };
        debug!(%id, "vessel created");
        id
    }

    /// Release a vessel, returning its final state.
    pub fn destroy(&mut self, id: VesselId) -> Result<VesselState, VesselError> {
        self.get(id)?;
        let slot = &mut self.slots[id.index as usize];
        let vessel = slot.vessel.take().ok_or(VesselError::StaleHandle(id))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        debug!(%id, "vessel destroyed");
        Ok(vessel)
    }

    pub fn get(&self, id: VesselId) -> Result<&VesselState, VesselError> {
        let slot = self
            .slots
            .get(id.index as usize)
            .ok_or(VesselError::UnknownVessel(id))?;
        match &slot.vessel {
            Some(v) if slot.generation == id.generation => Ok(v),
            _ => Err(VesselError::StaleHandle(id)),
        }
    }

    pub fn get_mut(&mut self, id: VesselId) -> Result<&mut VesselState, VesselError> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .ok_or(VesselError::UnknownVessel(id))?;
        if slot.generation != id.generation {
            return Err(VesselError::StaleHandle(id));
        }
        slot.vessel.as_mut().ok_or(VesselError::StaleHandle(id))
    }

    pub fn contains(&self, id: VesselId) -> bool {
        self.get(id).is_ok()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.vessel.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (VesselId, &VesselState)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.vessel.as_ref().map(|v| {
                (
                    VesselId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    v,
                )
            })
        })
    }

    pub fn step(
        &mut self,
        id: VesselId,
        dt: f64,
        forcing: &Forcing,
    ) -> Result<StepOutcome, VesselError> {
        Ok(step_vessel(self.get_mut(id)?, dt, forcing))
    }

    /// Step every live vessel with the same forcing.
    pub fn step_all(&mut self, dt: f64, forcing: &Forcing) -> StepSummary {
        let mut summary = StepSummary::default();
        for vessel in self.slots.iter_mut().filter_map(|s| s.vessel.as_mut()) {
            match step_vessel(vessel, dt, forcing) {
                StepOutcome::Advanced => summary.advanced += 1,
                StepOutcome::Skipped => summary.skipped += 1,
                StepOutcome::Restored => summary.restored += 1,
            }
        }
        summary
    }

    /// Shared staging buffer for the flat parameter ABI.
    pub fn param_buffer_mut(&mut self) -> &mut [f64; VESSEL_PARAM_BUFFER_CAPACITY] {
        &mut self.param_buffer
    }

    /// Apply the first `len` staged values to a vessel.
    pub fn apply_param_buffer(
        &mut self,
        id: VesselId,
        model_id: i32,
        len: usize,
    ) -> Result<usize, VesselError> {
        let len = len.min(VESSEL_PARAM_BUFFER_CAPACITY);
        let buffer = self.param_buffer;
        let vessel = self.get_mut(id)?;
        Ok(apply_vessel_params(vessel, model_id, &buffer[..len]))
    }

    pub fn clear_param_buffer(&mut self) {
        self.param_buffer = [0.0; VESSEL_PARAM_BUFFER_CAPACITY];
    }
}
