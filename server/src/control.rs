use bevy::prelude::*;
use shuttle_control::{aggregate_inputs, resolve_vehicle_dbg, PilotRoster, SampleTiming, ThrusterChange};
use tracing::{debug, trace, warn};

use crate::components::{
    ControlIntent, ControlTelemetry, ExtraShuttleInputs, Pilot, PilotControls, PilotLock, Shuttle,
    ShuttleBody, ShuttleSpec, Thrusters,
};
use crate::console::ConsoleLinkage;
use crate::events::{PilotDetached, ShuttleButtonEvent, ThrusterChanged};

/// Fixed-step counter. Button events received before a step belong to it.
#[derive(Resource, Debug, Clone, Copy, Default, Deref)]
pub struct SimTick(pub u64);

/// Vehicle → pilots, rebuilt at the start of every tick.
#[derive(Resource, Default, Deref)]
pub struct VehiclePilots(pub PilotRoster<Entity, Entity>);

pub fn advance_tick(mut tick: ResMut<SimTick>) {
    tick.0 += 1;
}

pub fn apply_button_events(
    tick: Res<SimTick>,
    mut events: EventReader<ShuttleButtonEvent>,
    mut pilots: Query<(&Pilot, &mut PilotControls)>,
) {
    for ev in events.read() {
        let Ok((pilot, mut controls)) = pilots.get_mut(ev.pilot) else {
            debug!(pilot = ?ev.pilot, "Button event for unknown pilot dropped");
            continue;
        };
        // Not at a console: nothing to fly, and nothing to carry over on sitting down.
        if pilot.console.is_none() {
            trace!(pilot = ?ev.pilot, "Button event from unseated pilot dropped");
            continue;
        }
        controls.handle_button(ev.button, ev.pressed, tick.0, ev.subtick);
    }
}

pub fn release_detached_pilots(
    tick: Res<SimTick>,
    mut events: EventReader<PilotDetached>,
    mut pilots: Query<(&mut Pilot, &mut PilotControls)>,
) {
    for ev in events.read() {
        let Ok((mut pilot, mut controls)) = pilots.get_mut(ev.pilot) else {
            continue;
        };
        controls.release_all(tick.0, 0);
        if let Some(console) = pilot.console.take() {
            debug!(pilot = ?ev.pilot, ?console, "Pilot detached");
        }
    }
}

pub fn collect_pilots(
    mut roster: ResMut<VehiclePilots>,
    pilots: Query<(Entity, &Pilot)>,
    linkage: ConsoleLinkage,
    shuttles: Query<(&Shuttle, Has<PilotLock>)>,
) {
    roster.0.clear();
    for (entity, pilot) in &pilots {
        let Some(console) = pilot.console else {
            continue;
        };
        let Some(vehicle) = linkage.vehicle_for(console) else {
            trace!(pilot = ?entity, ?console, "Console not linked to a vehicle");
            continue;
        };
        match shuttles.get(vehicle) {
            Ok((shuttle, locked)) if shuttle.enabled && !locked => {
                roster.0.link(vehicle, entity);
            }
            Ok(_) => trace!(pilot = ?entity, ?vehicle, "Shuttle locked or disabled"),
            Err(_) => trace!(pilot = ?entity, ?vehicle, "Console target is not a shuttle"),
        }
    }
    trace!(pilots = roster.pilot_count(), "Pilot roster rebuilt");
}

#[allow(clippy::type_complexity)]
pub fn aggregate_controls(
    tick: Res<SimTick>,
    roster: Res<VehiclePilots>,
    mut pilots: Query<&mut PilotControls>,
    mut shuttles: Query<(
        Entity,
        &Shuttle,
        Has<PilotLock>,
        &mut ControlIntent,
        Option<&mut ExtraShuttleInputs>,
    )>,
) {
    let timing = SampleTiming::Simulation { tick: tick.0 };
    for (vehicle, shuttle, locked, mut intent, extra) in &mut shuttles {
        let extra = extra.map(|mut e| std::mem::take(&mut e.0)).unwrap_or_default();
        if !shuttle.enabled || locked {
            intent.0 = None;
            continue;
        }
        let samples = roster
            .pilots(vehicle)
            .iter()
            .filter_map(|pilot| {
                let mut controls = pilots.get_mut(*pilot).ok()?;
                Some(controls.resolve(timing))
            });
        intent.0 = aggregate_inputs(samples.chain(extra));
    }
}

#[allow(clippy::type_complexity)]
pub fn resolve_shuttles(
    time: Res<Time<Fixed>>,
    mut shuttles: Query<(
        Entity,
        &ShuttleSpec,
        &ControlIntent,
        &mut ShuttleBody,
        &mut Thrusters,
        &mut ControlTelemetry,
        Option<&Name>,
    )>,
    mut changed: EventWriter<ThrusterChanged>,
) {
    let dt = time.timestep().as_secs_f32();
    let mut changes: Vec<ThrusterChange> = Vec::new();
    for (vehicle, spec, intent, mut body, mut thrusters, mut telemetry, name) in &mut shuttles {
        changes.clear();
        let result = resolve_vehicle_dbg(
            &spec.0,
            intent.0,
            &mut body.0,
            &mut thrusters.0,
            &mut changes,
            dt,
            Some(&mut telemetry.0),
        );
        if let Err(err) = result {
            warn!(?vehicle, name = ?name.map(Name::as_str), %err, "Shuttle control skipped");
            continue;
        }
        for change in changes.drain(..) {
            changed.write(ThrusterChanged { vehicle, change });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::HelmConsole;
    use bevy::ecs::system::RunSystemOnce;
    use shuttle_control::ShuttleButtons;

    fn seated_pilot(world: &mut World, console: Entity, button: ShuttleButtons) -> Entity {
        let mut controls = PilotControls::default();
        controls.handle_button(button, true, 1, 0);
        world
            .spawn((Pilot { console: Some(console) }, controls))
            .id()
    }

    #[test]
    fn pilot_gone_before_aggregation_is_dropped() {
        let mut world = World::new();
        world.insert_resource(SimTick(1));
        world.init_resource::<VehiclePilots>();
        let vehicle = world
            .spawn((Shuttle::default(), ControlIntent::default()))
            .id();
        let helm = world.spawn(HelmConsole { vehicle }).id();
        let leaving = seated_pilot(&mut world, helm, ShuttleButtons::STRAFE_LEFT);
        let _staying = seated_pilot(&mut world, helm, ShuttleButtons::STRAFE_UP);

        world.run_system_once(collect_pilots).unwrap();
        assert_eq!(world.resource::<VehiclePilots>().pilots(vehicle).len(), 2);

        world.despawn(leaving);
        world.run_system_once(aggregate_controls).unwrap();

        let intent = world.get::<ControlIntent>(vehicle).unwrap().0.unwrap();
        assert_eq!(intent.contributors, 1);
        assert!((intent.linear - Vec2::Y).length() < 1e-3, "{intent:?}");
    }
}
