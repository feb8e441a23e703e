use bevy_ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{HelmConsole, RelayConsole};

/// Relay chains longer than this are treated as broken.
pub const MAX_RELAY_HOPS: usize = 8;

#[derive(SystemParam)]
pub struct ConsoleLinkage<'w, 's> {
    helms: Query<'w, 's, &'static HelmConsole>,
    relays: Query<'w, 's, &'static RelayConsole>,
}

impl ConsoleLinkage<'_, '_> {
    /// Vehicle a console ultimately controls, following relays.
    pub fn vehicle_for(&self, console: Entity) -> Option<Entity> {
        let mut current = console;
        for _ in 0..=MAX_RELAY_HOPS {
            if let Ok(helm) = self.helms.get(current) {
                return Some(helm.vehicle);
            }
            current = self.relays.get(current).ok()?.target;
        }
        None
    }
}
