use std::path::Path;

use anyhow::{ensure, Context};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use shuttle_control::{presets, VehicleSpec};
use tracing::warn;

#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fixed simulation rate.
    pub tick_hz: u32,
    pub vehicles: Vec<VehicleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            vehicles: vec![VehicleConfig::default()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub name: String,
    /// kg
    pub mass: f32,
    /// kg·m²
    pub inertia: f32,
    pub position: [f32; 2],
    /// Heading in degrees, counter-clockwise from north.
    pub rotation: f32,
    /// Helm consoles spawned aboard and linked to this vehicle.
    pub helm_consoles: usize,
    pub hull: Hull,
    /// Full tuning table. Replaces the hull preset when present; fields left
    /// out fall back to the light shuttle values.
    pub spec: Option<VehicleSpec>,
}

/// Named tuning presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hull {
    #[default]
    LightShuttle,
    HeavyHauler,
}

impl Hull {
    pub fn spec(self) -> VehicleSpec {
        match self {
            Self::LightShuttle => presets::light_shuttle_spec(),
            Self::HeavyHauler => presets::heavy_hauler_spec(),
        }
    }
}

impl VehicleConfig {
    /// Tuning this vehicle flies with.
    pub fn spec(&self) -> VehicleSpec {
        self.spec.clone().unwrap_or_else(|| self.hull.spec())
    }
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            name: "skiff".to_string(),
            mass: 2000.0,
            inertia: 8000.0,
            position: [0.0, 0.0],
            rotation: 0.0,
            helm_consoles: 1,
            hull: Hull::LightShuttle,
            spec: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.tick_hz > 0, "tick_hz must be positive");
        for v in &self.vehicles {
            ensure!(
                v.mass > 0.0 && v.mass.is_finite(),
                "vehicle '{}': mass must be positive, got {}",
                v.name,
                v.mass
            );
            ensure!(
                v.inertia > 0.0 && v.inertia.is_finite(),
                "vehicle '{}': inertia must be positive, got {}",
                v.name,
                v.inertia
            );
            v.spec()
                .validate()
                .with_context(|| format!("vehicle '{}'", v.name))?;
        }
        Ok(())
    }
}

/// Read and validate the config at `path`. A missing file falls back to the
/// defaults.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validating config {}", path.display()))?;
    Ok(cfg)
}
