use bevy_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::AggregatedInput;

/// One pilot's control sample for a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShuttleInput {
    /// Local-frame strafe: +X east/right, +Y north/forward.
    pub strafe: Vec2,
    /// Negative turns counter-clockwise (left).
    pub rotation: f32,
    pub brake: f32,
}

impl ShuttleInput {
    pub const ZERO: Self = Self {
        strafe: Vec2::ZERO,
        rotation: 0.0,
        brake: 0.0,
    };

    /// A pilot sitting at the console without touching anything.
    pub fn is_idle(&self) -> bool {
        self.brake == 0.0 && self.rotation == 0.0 && self.strafe.length_squared() == 0.0
    }

    /// Strafe limited to unit length, rotation to [-1, 1], brake to [0, 1].
    pub fn clamped(self) -> Self {
        let strafe = if self.strafe.length_squared() > 1.0 {
            self.strafe.normalize_or_zero()
        } else {
            self.strafe
        };
        Self {
            strafe,
            rotation: self.rotation.clamp(-1.0, 1.0),
            brake: self.brake.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// No active pilot; thrusters off and the body may sleep.
    Unpiloted,
    /// Control loop ran.
    Driven,
    /// Non-positive timestep; nothing touched.
    Skipped,
}

/// Per-tick breakdown of what the resolver decided.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveDebug {
    pub dt: f32,
    pub input: AggregatedInput,
    pub mass: f32,
    // Local frame
    pub local_velocity: Vec2,
    pub brake_force: Vec2,
    pub candidate_force: Vec2,
    pub envelope_current: Vec2,
    pub envelope_wish: Vec2,
    pub envelope_corrected: bool,
    // World frame
    pub applied_force: Vec2,
    // Torques
    pub brake_torque: f32,
    pub control_torque: f32,
}
