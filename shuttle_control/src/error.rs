use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    #[error("vehicle body is immovable (mass = {mass})")]
    ImmovableBody { mass: f32 },
    #[error("thrust direction index {0} out of range (expected 0..4)")]
    InvalidDirection(usize),
    #[error("thrust table must have exactly 4 entries, got {0}")]
    ThrustTableLength(usize),
    #[error("invalid vehicle tuning: {0}")]
    InvalidTuning(String),
}
