//! Operator console: parses stdin lines into control commands queued for the
//! next fixed tick.
use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::{bail, Context, Result};
use bevy_ecs::prelude::Resource;
use parking_lot::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    Throttle { vessel: String, value: f64 },
    Rudder { vessel: String, value: f64 },
    Ballast { vessel: String, value: f64 },
    Refuel { vessel: String, value: f64 },
    Destroy { vessel: String },
}

impl ControlCommand {
    /// `throttle|rudder|ballast|refuel <vessel> <value>` or `destroy <vessel>`.
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command");
        };
        let Some(vessel) = parts.next().map(str::to_string) else {
            bail!("{verb}: missing vessel name");
        };
        let cmd = if verb == "destroy" {
            ControlCommand::Destroy { vessel }
        } else {
            let raw = parts.next().with_context(|| format!("{verb}: missing value"))?;
            let value: f64 = raw
                .parse()
                .with_context(|| format!("{verb}: {raw:?} is not a number"))?;
            match verb {
                "throttle" => ControlCommand::Throttle { vessel, value },
                "rudder" => ControlCommand::Rudder { vessel, value },
                "ballast" => ControlCommand::Ballast { vessel, value },
                "refuel" => ControlCommand::Refuel { vessel, value },
                other => bail!("unknown command {other:?}"),
            }
        };
        if let Some(extra) = parts.next() {
            bail!("unexpected trailing input {extra:?}");
        }
        Ok(cmd)
    }

    pub fn vessel(&self) -> &str {
        match self {
            ControlCommand::Throttle { vessel, .. }
            | ControlCommand::Rudder { vessel, .. }
            | ControlCommand::Ballast { vessel, .. }
            | ControlCommand::Refuel { vessel, .. }
            | ControlCommand::Destroy { vessel } => vessel,
        }
    }
}

/// Commands waiting for the next tick. Shared with the console thread.
#[derive(Resource, Clone, Default)]
pub struct ControlInbox(pub Arc<Mutex<VecDeque<ControlCommand>>>);

impl ControlInbox {
    pub fn push(&self, cmd: ControlCommand) {
        self.0.lock().push_back(cmd);
    }

    pub fn drain(&self) -> Vec<ControlCommand> {
        self.0.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

/// Feed lines from `reader` into the inbox until EOF.
pub fn pump_lines<R: BufRead>(reader: R, inbox: &ControlInbox) {
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(error = %e, "console read failed, closing console");
                return;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match ControlCommand::parse(trimmed) {
            Ok(cmd) => inbox.push(cmd),
            Err(e) => warn!(line = %trimmed, "rejected console command: {e:#}"),
        }
    }
    info!("console input closed");
}

pub fn spawn_console(inbox: ControlInbox) -> Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("vessel-console".into())
        .spawn(move || pump_lines(std::io::stdin().lock(), &inbox))
        .context("spawning console thread")
}
