use bevy_math::{Rot2, Vec2};

/// Minimum local speed (m/s) along an axis before a braking thruster shows as firing.
pub(super) const BRAKE_APPEARANCE_THRESHOLD: f32 = 0.1;

/// Angular input magnitude treated as "no steering".
pub(super) const ANGULAR_INPUT_EPSILON: f32 = 1e-6;

#[inline]
pub(super) fn world_to_local(rotation: Rot2, v: Vec2) -> Vec2 {
    rotation.inverse() * v
}

#[inline]
pub(super) fn local_to_world(rotation: Rot2, v: Vec2) -> Vec2 {
    rotation * v
}

/// Clamp without panicking on an inverted range.
#[inline]
pub(super) fn clamp_soft(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}
