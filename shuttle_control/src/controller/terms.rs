use bevy_math::Vec2;

use super::util::{clamp_soft, BRAKE_APPEARANCE_THRESHOLD};
use crate::{ThrustDirection, ThrusterSink, ThrusterState, VehicleSpec};

// ----- Linear braking -----

/// Counter-thrust for one local axis, capped so the axis velocity can reach
/// zero this tick but never cross it.
///
/// `toward_pos` is the thruster pushing along +axis.
#[allow(clippy::too_many_arguments)]
fn brake_axis<S: ThrusterSink + ?Sized>(
    spec: &VehicleSpec,
    velocity: f32,
    toward_pos: ThrustDirection,
    brake: f32,
    mass_per_dt: f32,
    thrusters: &mut ThrusterState,
    sink: &mut S,
) -> f32 {
    if velocity == 0.0 {
        return 0.0;
    }
    // Moving toward +axis means pushing toward −axis, and vice versa.
    let (fire, sign) = if velocity > 0.0 {
        (toward_pos.opposite(), -1.0)
    } else {
        (toward_pos, 1.0)
    };
    let idle = fire.opposite();
    thrusters.set_direction(idle, false, sink);
    if velocity.abs() > BRAKE_APPEARANCE_THRESHOLD {
        thrusters.set_direction(fire, true, sink);
    }
    let force = spec.thrust(fire) * brake * spec.brake_coefficient;
    sign * force.min(velocity.abs() * mass_per_dt)
}

/// Local-frame braking force for `local_velocity`.
pub(super) fn brake_force<S: ThrusterSink + ?Sized>(
    spec: &VehicleSpec,
    local_velocity: Vec2,
    brake: f32,
    mass: f32,
    dt: f32,
    thrusters: &mut ThrusterState,
    sink: &mut S,
) -> Vec2 {
    let mass_per_dt = mass / dt;
    Vec2::new(
        brake_axis(
            spec,
            local_velocity.x,
            ThrustDirection::East,
            brake,
            mass_per_dt,
            thrusters,
            sink,
        ),
        brake_axis(
            spec,
            local_velocity.y,
            ThrustDirection::North,
            brake,
            mass_per_dt,
            thrusters,
            sink,
        ),
    )
}

// ----- Torques -----

/// Counter-torque against `omega`, capped so the spin stops without reversing.
pub(super) fn torque_brake(spec: &VehicleSpec, brake: f32, omega: f32, torque_mul: f32) -> f32 {
    if omega == 0.0 || !(torque_mul > 0.0) {
        return 0.0;
    }
    let torque = -omega.signum() * spec.angular_thrust * brake * spec.brake_coefficient;
    let stop = -omega / torque_mul;
    if omega > 0.0 {
        torque.max(stop)
    } else {
        torque.min(stop)
    }
}

/// Steering torque, capped so one tick cannot carry `omega` past the limit.
pub(super) fn torque_control(spec: &VehicleSpec, angular_in: f32, omega: f32, torque_mul: f32) -> f32 {
    if !(torque_mul > 0.0) {
        return 0.0;
    }
    let torque = spec.angular_thrust * -angular_in;
    let limit = spec.max_angular_velocity;
    clamp_soft(torque, (-limit - omega) / torque_mul, (limit - omega) / torque_mul)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn brake_never_exceeds_stopping_force() {
        let spec = presets::light_shuttle_spec();
        let mut thrusters = ThrusterState::default();
        let (mass, dt) = (10.0, 1.0 / 60.0);
        let f = brake_force(&spec, Vec2::new(0.5, -0.05), 1.0, mass, dt, &mut thrusters, &mut ());
        assert!(f.x < 0.0 && f.y > 0.0);
        assert!(f.x.abs() <= 0.5 * mass / dt + 1e-3);
        assert!(f.y.abs() <= 0.05 * mass / dt + 1e-3);
        // Below the appearance threshold the south-moving axis stays dark.
        assert!(thrusters.is_active(ThrustDirection::West));
        assert!(!thrusters.is_active(ThrustDirection::North));
    }

    #[test]
    fn brake_torque_stops_without_reversal() {
        let spec = presets::light_shuttle_spec();
        let inv_i = 1.0 / 100.0;
        let dt = 1.0 / 60.0;
        let omega = 0.2;
        let tau = torque_brake(&spec, 1.0, omega, inv_i * dt);
        let omega_after = omega + tau * inv_i * dt;
        assert!(tau < 0.0);
        assert!(omega_after >= -1e-5, "omega_after = {omega_after}");
    }

    #[test]
    fn control_torque_respects_angular_limit() {
        let spec = presets::light_shuttle_spec();
        let inv_i = 1.0 / 10.0;
        let dt = 1.0 / 60.0;
        let omega = spec.max_angular_velocity - 0.01;
        // Rotate left → positive torque.
        let tau = torque_control(&spec, -1.0, omega, inv_i * dt);
        let omega_after = omega + tau * inv_i * dt;
        assert!(tau > 0.0);
        assert!(omega_after <= spec.max_angular_velocity + 1e-4);
    }

    #[test]
    fn infinite_inertia_gets_no_torque() {
        let spec = presets::light_shuttle_spec();
        assert_eq!(torque_control(&spec, 1.0, 0.0, 0.0), 0.0);
        assert_eq!(torque_brake(&spec, 1.0, 1.0, 0.0), 0.0);
    }
}
