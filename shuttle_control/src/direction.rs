use bevy_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::ControlError;

/// Cardinal thrust directions in the vehicle's local frame.
///
/// Frame conventions:
/// - +Y is north (the vehicle's nose), +X is east (starboard).
/// - A direction names where the thrust *pushes* the vehicle, so firing
///   `East` accelerates toward +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrustDirection {
    North,
    East,
    South,
    West,
}

impl ThrustDirection {
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Index into a four-entry thrust table (N/E/S/W).
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    pub const fn unit(self) -> Vec2 {
        match self {
            Self::North => Vec2::Y,
            Self::East => Vec2::X,
            Self::South => Vec2::NEG_Y,
            Self::West => Vec2::NEG_X,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

impl TryFrom<usize> for ThrustDirection {
    type Error = ControlError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ControlError::InvalidDirection(index))
    }
}

/// Set of cardinal directions, one flag per thrust table slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet([bool; 4]);

impl DirectionSet {
    pub const EMPTY: Self = Self([false; 4]);

    pub fn contains(self, dir: ThrustDirection) -> bool {
        self.0[dir.index()]
    }

    pub fn insert(&mut self, dir: ThrustDirection) {
        self.0[dir.index()] = true;
    }

    pub fn is_empty(self) -> bool {
        self.0.iter().all(|set| !set)
    }

    pub fn iter(self) -> impl Iterator<Item = ThrustDirection> {
        ThrustDirection::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

// Compass sectors counter-clockwise from east, 45° each.
const SECTORS: [&[ThrustDirection]; 8] = [
    &[ThrustDirection::East],
    &[ThrustDirection::East, ThrustDirection::North],
    &[ThrustDirection::North],
    &[ThrustDirection::North, ThrustDirection::West],
    &[ThrustDirection::West],
    &[ThrustDirection::West, ThrustDirection::South],
    &[ThrustDirection::South],
    &[ThrustDirection::South, ThrustDirection::East],
];

/// Cardinal thrusters that should fire for a local-frame input.
///
/// The bearing snaps to the nearest of eight compass sectors; diagonal
/// sectors fire both neighbouring cardinals.
pub fn implicated_directions(input: Vec2) -> DirectionSet {
    let mut set = DirectionSet::EMPTY;
    if input.length_squared() == 0.0 || !input.is_finite() {
        return set;
    }
    let angle = input.y.atan2(input.x);
    let sector = (angle / std::f32::consts::FRAC_PI_4).round() as i32;
    for dir in SECTORS[sector.rem_euclid(8) as usize] {
        set.insert(*dir);
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_through_try_from() {
        for dir in ThrustDirection::ALL {
            assert_eq!(ThrustDirection::try_from(dir.index()), Ok(dir));
        }
        assert_eq!(
            ThrustDirection::try_from(4),
            Err(ControlError::InvalidDirection(4))
        );
    }

    #[test]
    fn diagonal_input_fires_both_cardinals() {
        let set = implicated_directions(Vec2::new(1.0, 1.0));
        assert!(set.contains(ThrustDirection::North));
        assert!(set.contains(ThrustDirection::East));
        assert!(!set.contains(ThrustDirection::South));
        assert!(!set.contains(ThrustDirection::West));
    }

    #[test]
    fn near_axis_input_snaps_to_single_cardinal() {
        let set = implicated_directions(Vec2::new(-1.0, 0.1));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![ThrustDirection::West]);

        let set = implicated_directions(Vec2::new(0.05, -1.0));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![ThrustDirection::South]);
    }

    #[test]
    fn zero_input_fires_nothing() {
        assert!(implicated_directions(Vec2::ZERO).is_empty());
    }
}
