use bevy::prelude::*;
use shuttle_control::{ShuttleButtons, ThrusterChange};

#[derive(Event, Debug, Clone, Copy)]
pub struct ShuttleButtonEvent {
    pub pilot: Entity,
    pub button: ShuttleButtons,
    /// Position inside the current tick, 0..=SUBTICK_RESOLUTION.
    pub subtick: u16,
    pub pressed: bool,
}

/// Pilot left the console (or lost its body). Held buttons are released.
#[derive(Event, Debug, Clone, Copy)]
pub struct PilotDetached {
    pub pilot: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ThrusterChanged {
    pub vehicle: Entity,
    pub change: ThrusterChange,
}
