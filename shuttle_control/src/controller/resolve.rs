use bevy_math::Vec2;

use super::envelope::max_velocity;
use super::terms::{brake_force, torque_brake, torque_control};
use super::types::{ResolveDebug, ResolveOutcome};
use super::util::{local_to_world, world_to_local, ANGULAR_INPUT_EPSILON};
use crate::{
    implicated_directions, AggregatedInput, ControlError, RigidBody, ThrustDirection,
    ThrusterSink, ThrusterState, VehicleSpec,
};

/// One tick of the shuttle control loop.
/// See `resolve_vehicle_dbg` for the full breakdown.
pub fn resolve_vehicle<B, S>(
    spec: &VehicleSpec,
    input: Option<AggregatedInput>,
    body: &mut B,
    thrusters: &mut ThrusterState,
    sink: &mut S,
    dt: f32,
) -> Result<ResolveOutcome, ControlError>
where
    B: RigidBody + ?Sized,
    S: ThrusterSink + ?Sized,
{
    resolve_vehicle_dbg(spec, input, body, thrusters, sink, dt, None)
}

/// Variant of `resolve_vehicle` that fills out an optional telemetry struct.
///
/// `input` is `None` when the vehicle has no active pilot: every thruster is
/// switched off and the body is allowed to sleep. Otherwise braking, linear
/// thrust and steering are resolved in that order and applied as world-space
/// force and torque. Must run every tick; it is a closed loop on the body's
/// current velocity.
pub fn resolve_vehicle_dbg<B, S>(
    spec: &VehicleSpec,
    input: Option<AggregatedInput>,
    body: &mut B,
    thrusters: &mut ThrusterState,
    sink: &mut S,
    dt: f32,
    mut dbg: Option<&mut ResolveDebug>,
) -> Result<ResolveOutcome, ControlError>
where
    B: RigidBody + ?Sized,
    S: ThrusterSink + ?Sized,
{
    let Some(input) = input else {
        thrusters.disable_all(sink);
        body.set_sleeping_allowed(true);
        if let Some(d) = dbg {
            *d = ResolveDebug::default();
        }
        return Ok(ResolveOutcome::Unpiloted);
    };
    if dt <= 0.0 {
        return Ok(ResolveOutcome::Skipped);
    }
    let mass = body.mass();
    if !(mass > 0.0) || !mass.is_finite() {
        thrusters.disable_all(sink);
        return Err(ControlError::ImmovableBody { mass });
    }
    body.set_sleeping_allowed(false);

    let rotation = body.rotation();
    let velocity = body.linear_velocity();
    let omega = body.angular_velocity();
    let local_vel = world_to_local(rotation, velocity);
    let torque_mul = body.inv_inertia() * dt;

    let mut brake_local = Vec2::ZERO;
    let mut brake_torque = 0.0;
    let mut candidate = Vec2::ZERO;
    let mut env_current = Vec2::ZERO;
    let mut env_wish = Vec2::ZERO;
    let mut corrected = false;
    let mut applied = Vec2::ZERO;
    let mut control_torque = 0.0;

    // Brake
    if input.brake > 0.0 {
        if velocity.length_squared() > 0.0 {
            brake_local = brake_force(spec, local_vel, input.brake, mass, dt, thrusters, sink);
            let f = local_to_world(rotation, brake_local);
            if f != Vec2::ZERO {
                body.apply_force(f);
                applied += f;
            }
        } else {
            thrusters.disable_linear(sink);
        }

        // A body at rest leaves the angular flag to the steering phase below.
        brake_torque = torque_brake(spec, input.brake, omega, torque_mul);
        if brake_torque != 0.0 {
            body.apply_torque(brake_torque);
            thrusters.set_angular(true, sink);
        }
    }

    // Linear thrust
    if input.linear.length_squared() == 0.0 {
        if input.brake == 0.0 {
            thrusters.disable_linear(sink);
        }
    } else {
        let implicated = implicated_directions(input.linear);
        let magnitude = input.linear.length();
        for dir in ThrustDirection::ALL {
            if !implicated.contains(dir) {
                thrusters.set_direction(dir, false, sink);
                continue;
            }
            thrusters.set_direction(dir, true, sink);
            candidate += dir.unit() * spec.thrust(dir) * magnitude;
        }

        // Max velocity along where we are going, and along where we want to go.
        env_current = max_velocity(local_vel, spec, mass);
        env_wish = max_velocity(candidate, spec, mass);

        let mut force = candidate;
        if local_vel.length_squared() > env_current.length_squared() {
            // Over the envelope: steer velocity toward the wish envelope instead
            // of adding more speed.
            corrected = true;
            let delta = env_wish - env_current;
            let max_len = delta.length() * mass / dt;
            let len = candidate.length().min(max_len);
            force = delta.try_normalize().map_or(Vec2::ZERO, |d| d * len);

            // Never push against the wish direction.
            if let Some(wish) = candidate.try_normalize() {
                let along = force.dot(wish);
                if along < 0.0 {
                    force -= wish * along;
                }
            }
        }

        let f = local_to_world(rotation, force);
        if f.length_squared() > 0.0 {
            body.apply_force(f);
            applied += f;
        }
    }

    // Steering
    if input.angular.abs() < ANGULAR_INPUT_EPSILON {
        if brake_torque == 0.0 {
            thrusters.set_angular(false, sink);
        }
    } else {
        // Clamp against the spin left after braking, not the spin we started with.
        let braked_omega = omega + brake_torque * torque_mul;
        control_torque = torque_control(spec, input.angular, braked_omega, torque_mul);
        if control_torque != 0.0 {
            body.apply_torque(control_torque);
        }
        thrusters.set_angular(control_torque != 0.0 || brake_torque != 0.0, sink);
    }

    if let Some(d) = dbg.as_mut() {
        d.dt = dt;
        d.input = input;
        d.mass = mass;
        d.local_velocity = local_vel;
        d.brake_force = brake_local;
        d.candidate_force = candidate;
        d.envelope_current = env_current;
        d.envelope_wish = env_wish;
        d.envelope_corrected = corrected;
        d.applied_force = applied;
        d.brake_torque = brake_torque;
        d.control_torque = control_torque;
    }

    Ok(ResolveOutcome::Driven)
}
