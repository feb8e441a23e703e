use bevy::prelude::*;
use shuttle_control::{
    AggregatedInput, PilotInput, ResolveDebug, ShuttleInput, SimpleBody, ThrusterState,
    VehicleSpec,
};

#[derive(Component, Debug, Clone, Copy)]
pub struct Shuttle {
    /// Disabled shuttles ignore their pilots entirely.
    pub enabled: bool,
}

impl Default for Shuttle {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Component, Debug, Clone, Deref)]
pub struct ShuttleSpec(pub VehicleSpec);

/// Stand-in rigid body until a real physics backend is wired in.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct ShuttleBody(pub SimpleBody);

#[derive(Component, Debug, Clone, Default, Deref)]
pub struct Thrusters(pub ThrusterState);

/// Averaged input for the current tick. `None` means nobody is flying.
#[derive(Component, Debug, Clone, Copy, Default, Deref)]
pub struct ControlIntent(pub Option<AggregatedInput>);

/// Non-pilot sources (autopilot, scripted docking). Drained every tick.
#[derive(Component, Debug, Clone, Default, Deref, DerefMut)]
pub struct ExtraShuttleInputs(pub Vec<ShuttleInput>);

/// Present while pilots must not fly the shuttle, e.g. mid-jump.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PilotLock;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Pilot {
    pub console: Option<Entity>,
}

#[derive(Component, Debug, Clone, Default, Deref, DerefMut)]
pub struct PilotControls(pub PilotInput);

#[derive(Component, Debug, Clone, Copy)]
pub struct HelmConsole {
    pub vehicle: Entity,
}

/// Remote console that forwards to another console (helm or relay).
#[derive(Component, Debug, Clone, Copy)]
pub struct RelayConsole {
    pub target: Entity,
}

#[derive(Component, Debug, Clone, Copy, Default, Deref)]
pub struct ControlTelemetry(pub ResolveDebug);
