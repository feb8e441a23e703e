use serde::{Deserialize, Serialize};

use crate::{ControlError, ThrustDirection};

/// Thrust and velocity tuning for one shuttle hull.
///
/// Mass and inertia live on the physics body instead and are read
/// every tick so that cargo and damage are picked up without reconfiguring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSpec {
    /// Linear thrust per cardinal direction in newtons, indexed N/E/S/W.
    pub linear_thrust: [f32; 4],
    /// Torque available from the angular thrusters (N·m).
    pub angular_thrust: f32,
    /// Top speed (m/s) of a hull whose thrust-to-weight ratio equals the reference.
    pub base_max_linear_velocity: f32,
    /// Reference thrust-to-weight ratio (N/kg).
    pub base_max_velocity_twr: f32,
    /// How strongly top speed follows the thrust-to-weight ratio.
    pub max_velocity_scaling_exponent: f32,
    /// Global upper bound on linear speed (m/s).
    pub upper_max_velocity: f32,
    /// Optional cap chosen by the crew (m/s).
    pub set_max_velocity: Option<f32>,
    /// Angular speed (rad/s) that steering will not push past.
    pub max_angular_velocity: f32,
    pub brake_coefficient: f32,
}

impl Default for VehicleSpec {
    fn default() -> Self {
        presets::light_shuttle_spec()
    }
}

impl VehicleSpec {
    /// Build a spec from a loosely sized thrust table, as found in hand-written
    /// data files.
    pub fn from_thrust_slice(thrust: &[f32], angular_thrust: f32) -> Result<Self, ControlError> {
        let linear_thrust: [f32; 4] = thrust
            .try_into()
            .map_err(|_| ControlError::ThrustTableLength(thrust.len()))?;
        Ok(Self {
            linear_thrust,
            angular_thrust,
            ..Self::default()
        })
    }

    #[inline]
    pub fn thrust(&self, dir: ThrustDirection) -> f32 {
        self.linear_thrust[dir.index()]
    }

    /// Lower of the global bound and the crew-set cap.
    pub fn velocity_cap(&self) -> f32 {
        self.set_max_velocity
            .map_or(self.upper_max_velocity, |cap| cap.min(self.upper_max_velocity))
    }

    pub fn validate(&self) -> Result<(), ControlError> {
        let bad = |what: &str| Err(ControlError::InvalidTuning(what.to_string()));
        if self.linear_thrust.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return bad("linear thrust must be finite and non-negative");
        }
        if !self.angular_thrust.is_finite() || self.angular_thrust < 0.0 {
            return bad("angular thrust must be finite and non-negative");
        }
        if !(self.base_max_velocity_twr > 0.0) {
            return bad("reference thrust-to-weight ratio must be positive");
        }
        if self.base_max_linear_velocity < 0.0 || self.max_velocity_scaling_exponent < 0.0 {
            return bad("base velocity and scaling exponent must be non-negative");
        }
        if self.upper_max_velocity < 0.0 || self.set_max_velocity.is_some_and(|cap| cap < 0.0) {
            return bad("velocity caps must be non-negative");
        }
        if !(self.max_angular_velocity >= 0.0) || self.brake_coefficient < 0.0 {
            return bad("angular velocity cap and brake coefficient must be non-negative");
        }
        Ok(())
    }
}

pub mod presets {
    use super::*;

    // Small crewed shuttle, roughly 2 t loaded. Stronger fore/aft drives than
    // lateral thrusters.
    pub fn light_shuttle_spec() -> VehicleSpec {
        VehicleSpec {
            linear_thrust: [40_000.0, 24_000.0, 40_000.0, 24_000.0],
            angular_thrust: 30_000.0,
            base_max_linear_velocity: 20.0,
            base_max_velocity_twr: 20.0,
            max_velocity_scaling_exponent: 0.5,
            upper_max_velocity: 60.0,
            set_max_velocity: None,
            max_angular_velocity: 4.0,
            brake_coefficient: 1.5,
        }
    }

    // Cargo hauler: heavy, slow to turn, weak retro thrust.
    pub fn heavy_hauler_spec() -> VehicleSpec {
        VehicleSpec {
            linear_thrust: [600_000.0, 250_000.0, 300_000.0, 250_000.0],
            angular_thrust: 900_000.0,
            base_max_linear_velocity: 20.0,
            base_max_velocity_twr: 20.0,
            max_velocity_scaling_exponent: 0.5,
            upper_max_velocity: 60.0,
            set_max_velocity: Some(35.0),
            max_angular_velocity: 1.5,
            brake_coefficient: 1.5,
        }
    }
}
