//! Presentation cache of which thrusters are firing.

use serde::{Deserialize, Serialize};

use crate::ThrustDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrusterChange {
    Linear { direction: ThrustDirection, active: bool },
    Angular { active: bool },
}

/// Receives thruster transitions (visuals, audio). Never feeds back.
pub trait ThrusterSink {
    fn thruster_changed(&mut self, change: ThrusterChange);
}

impl ThrusterSink for Vec<ThrusterChange> {
    fn thruster_changed(&mut self, change: ThrusterChange) {
        self.push(change);
    }
}

impl ThrusterSink for () {
    fn thruster_changed(&mut self, _change: ThrusterChange) {}
}

/// Four linear flags (N/E/S/W) plus the angular flag.
///
/// Setters only notify the sink on an actual transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrusterState {
    linear: [bool; 4],
    angular: bool,
}

impl ThrusterState {
    pub fn is_active(&self, direction: ThrustDirection) -> bool {
        self.linear[direction.index()]
    }

    pub fn angular_active(&self) -> bool {
        self.angular
    }

    pub fn any_active(&self) -> bool {
        self.angular || self.linear.iter().any(|a| *a)
    }

    /// Returns whether the state changed.
    pub fn set_direction<S: ThrusterSink + ?Sized>(
        &mut self,
        direction: ThrustDirection,
        active: bool,
        sink: &mut S,
    ) -> bool {
        let slot = &mut self.linear[direction.index()];
        if *slot == active {
            return false;
        }
        *slot = active;
        sink.thruster_changed(ThrusterChange::Linear { direction, active });
        true
    }

    /// Returns whether the state changed.
    pub fn set_angular<S: ThrusterSink + ?Sized>(&mut self, active: bool, sink: &mut S) -> bool {
        if self.angular == active {
            return false;
        }
        self.angular = active;
        sink.thruster_changed(ThrusterChange::Angular { active });
        true
    }

    pub fn disable_linear<S: ThrusterSink + ?Sized>(&mut self, sink: &mut S) {
        for dir in ThrustDirection::ALL {
            self.set_direction(dir, false, sink);
        }
    }

    pub fn disable_all<S: ThrusterSink + ?Sized>(&mut self, sink: &mut S) {
        self.disable_linear(sink);
        self.set_angular(false, sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_enable_notifies_once() {
        let mut state = ThrusterState::default();
        let mut changes = Vec::new();
        assert!(state.set_direction(ThrustDirection::East, true, &mut changes));
        assert!(!state.set_direction(ThrustDirection::East, true, &mut changes));
        assert_eq!(
            changes,
            vec![ThrusterChange::Linear { direction: ThrustDirection::East, active: true }]
        );
        assert!(state.is_active(ThrustDirection::East));
    }

    #[test]
    fn disable_all_only_reports_active_thrusters() {
        let mut state = ThrusterState::default();
        state.set_direction(ThrustDirection::North, true, &mut ());
        state.set_angular(true, &mut ());

        let mut changes = Vec::new();
        state.disable_all(&mut changes);
        assert_eq!(
            changes,
            vec![
                ThrusterChange::Linear { direction: ThrustDirection::North, active: false },
                ThrusterChange::Angular { active: false },
            ]
        );
        assert!(!state.any_active());
    }
}
