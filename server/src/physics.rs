use bevy::prelude::*;

use crate::components::ShuttleBody;

/// Semi-implicit Euler step over the forces the controller accumulated.
pub fn integrate_bodies(time: Res<Time<Fixed>>, mut bodies: Query<&mut ShuttleBody>) {
    let dt = time.timestep().as_secs_f32();
    for mut body in &mut bodies {
        body.integrate(dt);
    }
}
