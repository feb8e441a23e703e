//! Shuttle movement control shared by the server and its tests.
//!
//! No ECS types in here. Pilots feed button state in,
//! the controller averages it per vehicle and turns it into forces and torques
//! on whatever rigid body implements [`RigidBody`].

mod error;
pub use error::ControlError;

mod direction;
pub use direction::{implicated_directions, DirectionSet, ThrustDirection};

mod body;
pub use body::{RigidBody, SimpleBody};

pub mod input;
pub use input::{PilotInput, SampleTiming, ShuttleButtons, SubtickState, SUBTICK_RESOLUTION};

pub mod aggregate;
pub use aggregate::{aggregate_inputs, AggregatedInput, PilotRoster};

pub mod thrusters;
pub use thrusters::{ThrusterChange, ThrusterSink, ThrusterState};

pub mod controller;
pub use controller::{
    max_velocity, resolve_vehicle, resolve_vehicle_dbg, ResolveDebug, ResolveOutcome,
    ShuttleInput,
};

mod vehicle_specs;
pub use vehicle_specs::presets;
pub use vehicle_specs::VehicleSpec;
