use anyhow::Result;
use clap::Parser;
use tracing::info;

use shuttle_server::{build_server_app, load_config, Args};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let cfg = load_config(&args.config)?;
    info!(config = %args.config.display(), tick_hz = cfg.tick_hz, "Server config loaded");
    for vehicle in &cfg.vehicles {
        info!(name = %vehicle.name, hull = ?vehicle.hull, custom_spec = vehicle.spec.is_some(), "Vehicle configured");
    }

    let mut app = build_server_app(cfg);
    app.insert_resource(args);
    let exit = app.run();
    info!(?exit, "Server stopped");
    Ok(())
}
