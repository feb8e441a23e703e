use std::path::PathBuf;

use bevy::prelude::Resource;
use clap::Parser;

#[derive(Parser, Debug, Resource, Clone)]
#[command(name = "shuttle-server")]
#[command(about = "Headless shuttle control simulation", long_about = None)]
pub struct Args {
    /// Path to the TOML config (vehicles, tick rate)
    #[arg(long, default_value = "server.toml")]
    pub config: PathBuf,
}
