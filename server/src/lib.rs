use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::math::Rot2;
use bevy::prelude::*;
use shuttle_control::{AggregatedInput, SimpleBody};
use tracing::info;

pub mod args;
pub mod components;
pub mod config;
pub mod console;
pub mod control;
pub mod events;
pub mod physics;

pub use args::Args;
pub use components::*;
pub use config::{load_config, Config, Hull, VehicleConfig};
pub use console::{ConsoleLinkage, MAX_RELAY_HOPS};
pub use control::{SimTick, VehiclePilots};
pub use events::{PilotDetached, ShuttleButtonEvent, ThrusterChanged};

/// Ordering of the fixed-step control pipeline.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShuttleSet {
    /// Tick advance, button ingestion, detach handling.
    Input,
    /// Roster rebuild, aggregation, force/torque resolution.
    Control,
    Physics,
}

pub struct ShuttleControlPlugin;

impl Plugin for ShuttleControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimTick>()
            .init_resource::<VehiclePilots>()
            .init_resource::<Fleet>()
            .add_event::<ShuttleButtonEvent>()
            .add_event::<PilotDetached>()
            .add_event::<ThrusterChanged>()
            .configure_sets(
                FixedUpdate,
                (ShuttleSet::Input, ShuttleSet::Control, ShuttleSet::Physics).chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    control::advance_tick,
                    control::apply_button_events,
                    control::release_detached_pilots,
                )
                    .chain()
                    .in_set(ShuttleSet::Input),
            )
            .add_systems(
                FixedUpdate,
                (
                    control::collect_pilots,
                    control::aggregate_controls,
                    control::resolve_shuttles,
                )
                    .chain()
                    .in_set(ShuttleSet::Control),
            )
            .add_systems(
                FixedUpdate,
                physics::integrate_bodies.in_set(ShuttleSet::Physics),
            );
    }
}

/// A spawned vehicle and its helm consoles, in config order.
#[derive(Debug, Clone)]
pub struct SpawnedVehicle {
    pub name: String,
    pub vehicle: Entity,
    pub consoles: Vec<Entity>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct Fleet(pub Vec<SpawnedVehicle>);

impl Fleet {
    pub fn by_name(&self, name: &str) -> Option<&SpawnedVehicle> {
        self.0.iter().find(|v| v.name == name)
    }
}

pub fn build_server_app(cfg: Config) -> App {
    let mut app = App::new();
    let tick = Duration::from_secs_f64(1.0 / f64::from(cfg.tick_hz.max(1)));
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(tick)))
        .insert_resource(Time::<Fixed>::from_duration(tick))
        .add_plugins(ShuttleControlPlugin);

    let world = app.world_mut();
    for vehicle in &cfg.vehicles {
        let spawned = spawn_vehicle(world, vehicle);
        info!(
            name = %spawned.name,
            entity = ?spawned.vehicle,
            consoles = spawned.consoles.len(),
            "Shuttle spawned"
        );
        world.resource_mut::<Fleet>().0.push(spawned);
    }
    app.insert_resource(cfg);
    app
}

pub fn spawn_vehicle(world: &mut World, cfg: &VehicleConfig) -> SpawnedVehicle {
    let mut body = SimpleBody::new(cfg.mass, cfg.inertia).with_rotation(Rot2::degrees(cfg.rotation));
    body.position = Vec2::from(cfg.position);
    let vehicle = world
        .spawn((
            Name::new(cfg.name.clone()),
            Shuttle::default(),
            ShuttleSpec(cfg.spec()),
            ShuttleBody(body),
            Thrusters::default(),
            ControlIntent::default(),
            ExtraShuttleInputs::default(),
            ControlTelemetry::default(),
        ))
        .id();
    let consoles = (0..cfg.helm_consoles)
        .map(|i| {
            world
                .spawn((Name::new(format!("{} helm {i}", cfg.name)), HelmConsole { vehicle }))
                .id()
        })
        .collect();
    SpawnedVehicle {
        name: cfg.name.clone(),
        vehicle,
        consoles,
    }
}

/// Spawn a pilot, optionally already seated at `console`.
pub fn spawn_pilot(world: &mut World, console: Option<Entity>) -> Entity {
    world
        .spawn((Pilot { console }, PilotControls::default()))
        .id()
}

/// Aggregated input the vehicle acted on during the last tick.
pub fn aggregated_input(world: &World, vehicle: Entity) -> Option<AggregatedInput> {
    world.get::<ControlIntent>(vehicle).and_then(|intent| intent.0)
}
