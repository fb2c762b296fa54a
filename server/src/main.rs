use anyhow::Result;
use clap::Parser;
use tracing::info;

use server::{build_server_app, console::spawn_console, load_config, Args, ControlInbox};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut cfg = load_config(args.config.as_deref())?;
    if args.ticks.is_some() {
        cfg.max_ticks = args.ticks;
    }
    info!(?cfg, "Server config loaded");

    let mut app = build_server_app(cfg)?;
    if args.console {
        let inbox = app.world().resource::<ControlInbox>().clone();
        spawn_console(inbox)?;
    }
    app.insert_resource(args);
    app.run();
    Ok(())
}
