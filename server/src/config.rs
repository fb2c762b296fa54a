use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vessel::param_abi::{accept_rule, param_index, MODEL_DISPLACEMENT, VESSEL_PARAM_BUFFER_CAPACITY};
use vessel::{hullspecs, AllocationMode, EnvironmentState, Fleet, VesselId, VesselSpawn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed simulation rate.
    pub tick_hz: f64,
    /// Log a telemetry line per vessel every N ticks. 0 disables.
    pub telemetry_every: u64,
    /// Exit after this many ticks.
    pub max_ticks: Option<u64>,
    /// Keep at most one live vessel, returning it for repeat creates.
    pub single_slot: bool,
    /// Derive wave forcing from the sea-state tables.
    pub sea_state: Option<f64>,
    pub environment: EnvironmentState,
    pub vessels: Vec<VesselConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_hz: 20.0,
            telemetry_every: 20,
            max_ticks: None,
            single_slot: false,
            sea_state: None,
            environment: EnvironmentState::default(),
            vessels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselConfig {
    pub name: String,
    pub preset: String,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub throttle: f64,
    pub rudder: f64,
    pub ballast: Option<f64>,
    /// Named parameter-ABI overrides, e.g. `engine_time_constant = 1.5`.
    pub params: BTreeMap<String, f64>,
}

impl Default for VesselConfig {
    fn default() -> Self {
        Self {
            name: "vessel".to_string(),
            preset: "default".to_string(),
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            throttle: 0.0,
            rudder: 0.0,
            ballast: None,
            params: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tick_hz.is_finite() && self.tick_hz > 0.0,
            "tick_hz must be a positive number, got {}",
            self.tick_hz
        );
        let mut names = HashSet::new();
        for v in &self.vessels {
            ensure!(!v.name.trim().is_empty(), "vessel names must not be empty");
            ensure!(names.insert(v.name.as_str()), "duplicate vessel name {:?}", v.name);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz)
    }

    pub fn allocation_mode(&self) -> AllocationMode {
        if self.single_slot {
            AllocationMode::SingleSlot
        } else {
            AllocationMode::AlwaysNew
        }
    }

    /// Scene environment with the sea-state waves applied, if configured.
    pub fn resolved_environment(&self) -> EnvironmentState {
        let mut env = self.environment;
        if let Some(s) = self.sea_state {
            env.apply_sea_state(s);
        }
        env
    }
}

/// Read and validate a TOML config. No path means built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg = parse_config(&text).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

pub fn parse_config(text: &str) -> Result<Config> {
    let cfg: Config = toml::from_str(text)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Spawn every configured vessel into a fresh fleet.
pub fn build_fleet(cfg: &Config) -> Result<(Fleet, Vec<(VesselId, String)>)> {
    let mut fleet = Fleet::new(cfg.allocation_mode());
    let mut spawned = Vec::with_capacity(cfg.vessels.len());
    for vc in &cfg.vessels {
        if fleet.mode() == AllocationMode::SingleSlot && !fleet.is_empty() {
            warn!(vessel = %vc.name, "single-slot fleet already holds a vessel, skipping");
            continue;
        }
        let id = spawn_vessel(&mut fleet, vc).with_context(|| format!("vessel {:?}", vc.name))?;
        spawned.push((id, vc.name.clone()));
    }
    Ok((fleet, spawned))
}

fn spawn_vessel(fleet: &mut Fleet, vc: &VesselConfig) -> Result<VesselId> {
    let Some(preset) = hullspecs::by_name(&vc.preset) else {
        bail!(
            "unknown preset {:?}, expected one of {:?}",
            vc.preset,
            hullspecs::NAMES
        );
    };
    let spawn = VesselSpawn {
        throttle: vc.throttle,
        rudder_angle: vc.rudder,
        ..VesselSpawn::from_preset(&preset)
    }
    .at(vc.x, vc.y, vc.heading);
    let id = fleet.create(spawn);

    if let Some(b) = vc.ballast {
        fleet.get_mut(id)?.set_ballast(b);
    }

    if !vc.params.is_empty() {
        let encoded = fleet.get(id)?.params().to_param_buffer();
        let mut highest = 0;
        {
            let buf = fleet.param_buffer_mut();
            *buf = encoded;
            for (name, &value) in &vc.params {
                let Some(index) = param_index(name) else {
                    bail!("unknown vessel parameter {:?}", name);
                };
                let admitted = accept_rule(index).is_some_and(|rule| rule.admits(value));
                if !admitted {
                    warn!(
                        vessel = %vc.name,
                        param = %name,
                        value,
                        "parameter rejected, keeping preset value"
                    );
                }
                buf[index] = value;
                highest = highest.max(index + 1);
            }
        }
        let len = highest.min(VESSEL_PARAM_BUFFER_CAPACITY);
        let accepted = fleet.apply_param_buffer(id, MODEL_DISPLACEMENT, len)?;
        fleet.clear_param_buffer();
        debug!(
            vessel = %vc.name,
            overrides = vc.params.len(),
            accepted,
            "parameter overrides applied"
        );
    }
    Ok(id)
}
