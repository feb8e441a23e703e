use bevy_math::{Rot2, Vec2};
use serde::{Deserialize, Serialize};

/// What the controller needs from a physics backend.
///
/// Forces are in world space. The controller never integrates on its own; the
/// backend applies accumulated force and torque in its solve step.
pub trait RigidBody {
    fn mass(&self) -> f32;
    /// Inverse rotational inertia (1 / kg·m²). Zero means the body cannot spin.
    fn inv_inertia(&self) -> f32;
    fn linear_velocity(&self) -> Vec2;
    /// Counter-clockwise positive (rad/s).
    fn angular_velocity(&self) -> f32;
    /// Body→world rotation.
    fn rotation(&self) -> Rot2;
    fn apply_force(&mut self, force: Vec2);
    fn apply_torque(&mut self, torque: f32);
    fn set_sleeping_allowed(&mut self, allowed: bool);
}

/// Minimal force-accumulating body integrated with semi-implicit Euler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleBody {
    pub position: Vec2,
    pub rotation: Rot2,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub mass: f32,
    pub inv_inertia: f32,
    pub sleeping_allowed: bool,
    /// Accumulated world force for the current step.
    pub force: Vec2,
    /// Accumulated torque for the current step.
    pub torque: f32,
}

impl SimpleBody {
    pub fn new(mass: f32, inertia: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: Rot2::IDENTITY,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass,
            inv_inertia: if inertia > 0.0 { inertia.recip() } else { 0.0 },
            sleeping_allowed: true,
            force: Vec2::ZERO,
            torque: 0.0,
        }
    }

    pub fn with_velocity(mut self, linear: Vec2, angular: f32) -> Self {
        self.linear_velocity = linear;
        self.angular_velocity = angular;
        self
    }

    pub fn with_rotation(mut self, rotation: Rot2) -> Self {
        self.rotation = rotation;
        self
    }

    /// Apply accumulated force/torque over `dt`, then clear the accumulators.
    pub fn integrate(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        if self.mass > 0.0 {
            self.linear_velocity += self.force / self.mass * dt;
        }
        self.angular_velocity += self.torque * self.inv_inertia * dt;
        self.position += self.linear_velocity * dt;
        self.rotation = (self.rotation * Rot2::radians(self.angular_velocity * dt)).fast_renormalize();
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}

impl RigidBody for SimpleBody {
    fn mass(&self) -> f32 {
        self.mass
    }

    fn inv_inertia(&self) -> f32 {
        self.inv_inertia
    }

    fn linear_velocity(&self) -> Vec2 {
        self.linear_velocity
    }

    fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    fn rotation(&self) -> Rot2 {
        self.rotation
    }

    fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }

    fn set_sleeping_allowed(&mut self, allowed: bool) {
        self.sleeping_allowed = allowed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrate_applies_and_clears_accumulators() {
        let mut body = SimpleBody::new(10.0, 5.0);
        body.apply_force(Vec2::new(100.0, 0.0));
        body.apply_torque(10.0);
        body.integrate(0.5);
        assert!((body.linear_velocity.x - 5.0).abs() < 1e-6);
        assert!((body.angular_velocity - 1.0).abs() < 1e-6);
        assert_eq!(body.force, Vec2::ZERO);
        assert_eq!(body.torque, 0.0);

        // Next step coasts.
        body.integrate(0.5);
        assert!((body.linear_velocity.x - 5.0).abs() < 1e-6);
    }

    #[test]
    fn zero_inertia_never_spins() {
        let mut body = SimpleBody::new(10.0, 0.0);
        body.apply_torque(1000.0);
        body.integrate(1.0);
        assert_eq!(body.angular_velocity, 0.0);
    }
}
