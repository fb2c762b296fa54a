use anyhow::Result;
use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use tracing::info;

pub mod args;
mod config;
pub mod console;
pub mod sim;

pub use args::Args;
pub use config::{build_fleet, load_config, parse_config, Config, VesselConfig};
pub use console::{ControlCommand, ControlInbox};
use sim::{
    apply_console_commands, report_telemetry, step_fleet, stop_after_max_ticks, ShipLabel,
    SimClock, SimSet, SimWorld,
};

/// Headless app ticking the fleet at `tick_hz` in real time.
pub fn build_server_app(cfg: Config) -> Result<App> {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(cfg.tick_interval())));
    configure_sim(&mut app, &cfg)?;
    Ok(app)
}

/// Same world and systems with no plugins. Tests drive it by running
/// `FixedUpdate` directly.
pub fn build_sim_app(cfg: Config) -> Result<App> {
    let mut app = App::new();
    configure_sim(&mut app, &cfg)?;
    Ok(app)
}

fn configure_sim(app: &mut App, cfg: &Config) -> Result<()> {
    cfg.validate()?;
    let (fleet, spawned) = build_fleet(cfg)?;
    let env = cfg.resolved_environment();
    info!(vessels = spawned.len(), mode = ?fleet.mode(), "fleet ready");

    app.insert_resource(Time::<Fixed>::from_hz(cfg.tick_hz))
        .insert_resource(SimWorld { fleet, env })
        .insert_resource(SimClock {
            max_ticks: cfg.max_ticks,
            telemetry_every: cfg.telemetry_every,
            ..Default::default()
        })
        .init_resource::<ControlInbox>();

    for (id, name) in spawned {
        app.world_mut().spawn(ShipLabel { id, name });
    }

    app.add_systems(
        FixedUpdate,
        (
            apply_console_commands,
            step_fleet,
            report_telemetry,
            stop_after_max_ticks,
        )
            .chain()
            .in_set(SimSet),
    );
    Ok(())
}
