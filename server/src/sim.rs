//! ECS side of the host: resources wrapping the fleet and the fixed-tick
//! systems that drive it.
use bevy::prelude::*;
use tracing::{debug, info, warn};
use vessel::{EnvironmentState, Fleet, VesselId};

use crate::console::{ControlCommand, ControlInbox};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimSet;

#[derive(Resource, Debug)]
pub struct SimWorld {
    pub fleet: Fleet,
    pub env: EnvironmentState,
}

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimClock {
    pub tick: u64,
    /// Seconds of simulated time.
    pub elapsed: f64,
    pub max_ticks: Option<u64>,
    pub telemetry_every: u64,
}

/// Names a live vessel. Despawned with it.
#[derive(Component, Debug, Clone)]
pub struct ShipLabel {
    pub id: VesselId,
    pub name: String,
}

pub fn apply_console_commands(
    mut commands: Commands,
    inbox: Res<ControlInbox>,
    mut world: ResMut<SimWorld>,
    labels: Query<(Entity, &ShipLabel)>,
) {
    for cmd in inbox.drain() {
        let Some((entity, label)) = labels.iter().find(|(_, l)| l.name == cmd.vessel()) else {
            warn!(vessel = %cmd.vessel(), "command for unknown vessel");
            continue;
        };
        if let ControlCommand::Destroy { .. } = cmd {
            match world.fleet.destroy(label.id) {
                Ok(_) => {
                    commands.entity(entity).despawn();
                    info!(vessel = %label.name, id = %label.id, "vessel destroyed");
                }
                Err(e) => warn!(vessel = %label.name, "destroy failed: {e}"),
            }
            continue;
        }
        let vessel = match world.fleet.get_mut(label.id) {
            Ok(v) => v,
            Err(e) => {
                warn!(vessel = %label.name, "command dropped: {e}");
                continue;
            }
        };
        match cmd {
            ControlCommand::Throttle { value, .. } => vessel.set_throttle(value),
            ControlCommand::Rudder { value, .. } => vessel.set_rudder_angle(value),
            ControlCommand::Ballast { value, .. } => vessel.set_ballast(value),
            ControlCommand::Refuel { value, .. } => vessel.set_fuel_level(value),
            ControlCommand::Destroy { .. } => {}
        }
        debug!(vessel = %label.name, ?cmd, "command applied");
    }
}

pub fn step_fleet(
    time: Res<Time<Fixed>>,
    mut world: ResMut<SimWorld>,
    mut clock: ResMut<SimClock>,
) {
    let dt = time.timestep().as_secs_f64();
    let SimWorld { fleet, env } = &mut *world;
    let summary = fleet.step_all(dt, &env.forcing());
    if summary.restored > 0 {
        warn!(tick = clock.tick, restored = summary.restored, "non-finite state rolled back");
    }
    clock.tick += 1;
    clock.elapsed += dt;
}

pub fn report_telemetry(world: Res<SimWorld>, clock: Res<SimClock>, labels: Query<&ShipLabel>) {
    if clock.telemetry_every == 0 || clock.tick % clock.telemetry_every != 0 {
        return;
    }
    for label in &labels {
        let Ok(vessel) = world.fleet.get(label.id) else {
            continue;
        };
        let s = vessel.snapshot();
        info!(
            vessel = %label.name,
            tick = clock.tick,
            x = s.x,
            y = s.y,
            heading = s.heading,
            speed = s.speed,
            rpm = s.engine_rpm,
            rudder = s.rudder_angle,
            roll = s.roll,
            fuel = s.fuel_level,
            "telemetry"
        );
    }
}

pub fn stop_after_max_ticks(clock: Res<SimClock>, mut exit: EventWriter<AppExit>) {
    if matches!(clock.max_ticks, Some(max) if clock.tick >= max) {
        info!(tick = clock.tick, elapsed = clock.elapsed, "tick limit reached, exiting");
        exit.write(AppExit::Success);
    }
}
