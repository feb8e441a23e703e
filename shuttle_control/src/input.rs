//! Per-pilot input sampling with sub-tick accumulation.
//!
//! Button changes arrive stamped with a sub-tick position inside the current
//! fixed step. Each change closes out the span since the previously consumed
//! sub-tick using the buttons held *during* that span, so a tap shorter than a
//! tick still contributes its share. Only the delta past the last consumed
//! sub-tick counts, which makes duplicated or late messages harmless.

use std::ops::BitOr;

use bevy_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::controller::ShuttleInput;

/// Number of sub-tick steps in one fixed simulation step.
pub const SUBTICK_RESOLUTION: u16 = u16::MAX;

/// Held-button bitmask for shuttle piloting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShuttleButtons(u8);

impl ShuttleButtons {
    pub const NONE: Self = Self(0);
    pub const STRAFE_UP: Self = Self(1 << 0);
    pub const STRAFE_DOWN: Self = Self(1 << 1);
    pub const STRAFE_LEFT: Self = Self(1 << 2);
    pub const STRAFE_RIGHT: Self = Self(1 << 3);
    pub const ROTATE_LEFT: Self = Self(1 << 4);
    pub const ROTATE_RIGHT: Self = Self(1 << 5);
    pub const BRAKE: Self = Self(1 << 6);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn set(&mut self, buttons: Self, pressed: bool) {
        if pressed {
            self.0 |= buttons.0;
        } else {
            self.0 &= !buttons.0;
        }
    }

    /// Unit contribution of the held buttons for one full tick.
    ///
    /// Opposing buttons cancel. Rotation is counter-clockwise negative so that
    /// `ROTATE_LEFT` yields -1.
    pub fn unit_sample(self) -> ShuttleInput {
        let axis = |neg: Self, pos: Self| -> f32 {
            let mut v = 0.0;
            if self.contains(neg) {
                v -= 1.0;
            }
            if self.contains(pos) {
                v += 1.0;
            }
            v
        };
        ShuttleInput {
            strafe: Vec2::new(
                axis(Self::STRAFE_LEFT, Self::STRAFE_RIGHT),
                axis(Self::STRAFE_DOWN, Self::STRAFE_UP),
            ),
            rotation: axis(Self::ROTATE_LEFT, Self::ROTATE_RIGHT),
            brake: if self.contains(Self::BRAKE) { 1.0 } else { 0.0 },
        }
    }
}

impl BitOr for ShuttleButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Accumulation state of a pilot within the simulation timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubtickState {
    /// Nothing recorded yet.
    #[default]
    Idle,
    /// Accumulating for `tick`; everything up to `consumed` is already counted.
    Accumulating { tick: u64, consumed: u16 },
}

/// When a sample is being taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleTiming {
    /// Inside the fixed step `tick`.
    Simulation { tick: u64 },
    /// Outside the fixed step (per-frame prediction). Treated as a full tick.
    Frame,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PilotInput {
    held: ShuttleButtons,
    state: SubtickState,
    acc: ShuttleInput,
}

impl PilotInput {
    pub fn held(&self) -> ShuttleButtons {
        self.held
    }

    pub fn state(&self) -> SubtickState {
        self.state
    }

    /// Record a press or release of `buttons` at `subtick` within `tick`.
    pub fn handle_button(&mut self, buttons: ShuttleButtons, pressed: bool, tick: u64, subtick: u16) {
        let mut held = self.held;
        held.set(buttons, pressed);
        self.set_held(held, tick, subtick);
    }

    /// Release everything, e.g. when the pilot leaves the console.
    pub fn release_all(&mut self, tick: u64, subtick: u16) {
        self.set_held(ShuttleButtons::NONE, tick, subtick);
    }

    fn set_held(&mut self, held: ShuttleButtons, tick: u64, subtick: u16) {
        self.advance_to(tick, subtick);
        self.held = held;
    }

    /// Finalize the sample for this tick.
    ///
    /// In simulation the remainder of the tick is credited to the buttons still
    /// held and the tick is marked fully consumed, so resolving again within the
    /// same tick returns the same sample.
    pub fn resolve(&mut self, timing: SampleTiming) -> ShuttleInput {
        match timing {
            SampleTiming::Simulation { tick } => {
                self.advance_to(tick, SUBTICK_RESOLUTION);
                self.acc
            }
            SampleTiming::Frame => self.held.unit_sample(),
        }
    }

    fn advance_to(&mut self, tick: u64, subtick: u16) {
        let consumed = match self.state {
            SubtickState::Accumulating { tick: current, consumed } if current >= tick => consumed,
            _ => {
                // Tick rollover is the only transition that discards accumulation.
                self.acc = ShuttleInput::ZERO;
                self.state = SubtickState::Accumulating { tick, consumed: 0 };
                0
            }
        };
        if subtick < consumed {
            return;
        }
        let fraction = f32::from(subtick - consumed) / f32::from(SUBTICK_RESOLUTION);
        let unit = self.held.unit_sample();
        self.acc.strafe += unit.strafe * fraction;
        self.acc.rotation += unit.rotation * fraction;
        self.acc.brake += unit.brake * fraction;
        if let SubtickState::Accumulating { consumed, .. } = &mut self.state {
            *consumed = subtick;
        }
    }
}
