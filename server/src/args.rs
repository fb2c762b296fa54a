use std::path::PathBuf;

use bevy::prelude::Resource;
use clap::Parser;

#[derive(Parser, Debug, Resource, Clone)]
#[command(name = "vessel-server")]
#[command(about = "Headless fixed-rate host for the vessel dynamics engine", long_about = None)]
pub struct Args {
    /// TOML scene config. Built-in defaults when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Read control commands from stdin
    #[arg(long, default_value_t = false)]
    pub console: bool,
    /// Exit after this many ticks, overriding the config
    #[arg(long)]
    pub ticks: Option<u64>,
}
