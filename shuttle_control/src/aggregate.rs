//! Combining every pilot's sample into one input per vehicle.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use bevy_math::Vec2;
use serde::{Deserialize, Serialize};

use crate::controller::ShuttleInput;

/// Averaged control intent for one vehicle and one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedInput {
    /// Local-frame strafe, length ≤ 1.
    pub linear: Vec2,
    /// In [-1, 1]; negative turns counter-clockwise.
    pub angular: f32,
    /// In [0, 1].
    pub brake: f32,
    /// Non-idle sources that went into the average.
    pub contributors: usize,
}

/// Average the non-idle samples.
///
/// Returns `None` when nobody is actively flying, which the resolver treats as
/// an unpiloted vehicle. Each sample is clamped before it is averaged so a
/// single out-of-range source cannot dominate.
pub fn aggregate_inputs<I>(samples: I) -> Option<AggregatedInput>
where
    I: IntoIterator<Item = ShuttleInput>,
{
    let mut sum = AggregatedInput::default();
    for sample in samples {
        if sample.is_idle() {
            continue;
        }
        let sample = sample.clamped();
        sum.linear += sample.strafe;
        sum.angular += sample.rotation;
        sum.brake += sample.brake;
        sum.contributors += 1;
    }
    if sum.contributors == 0 {
        return None;
    }
    let n = sum.contributors as f32;
    Some(AggregatedInput {
        linear: sum.linear / n,
        angular: sum.angular / n,
        brake: sum.brake / n,
        contributors: sum.contributors,
    })
}

/// Vehicle → pilots map for a single tick.
///
/// Cleared and refilled every tick rather than patched, so removed consoles or
/// pilots never linger. A pilot can be linked to at most one vehicle per tick.
#[derive(Debug, Clone)]
pub struct PilotRoster<V, P> {
    by_vehicle: HashMap<V, Vec<P>>,
    linked: HashSet<P>,
}

impl<V, P> Default for PilotRoster<V, P> {
    fn default() -> Self {
        Self {
            by_vehicle: HashMap::new(),
            linked: HashSet::new(),
        }
    }
}

impl<V, P> PilotRoster<V, P>
where
    V: Copy + Eq + Hash,
    P: Copy + Eq + Hash,
{
    /// Drop every link, keeping allocations for the next tick.
    pub fn clear(&mut self) {
        self.by_vehicle.values_mut().for_each(Vec::clear);
        self.linked.clear();
    }

    /// Returns `false` if `pilot` is already linked this tick.
    pub fn link(&mut self, vehicle: V, pilot: P) -> bool {
        if !self.linked.insert(pilot) {
            return false;
        }
        self.by_vehicle.entry(vehicle).or_default().push(pilot);
        true
    }

    pub fn pilots(&self, vehicle: V) -> &[P] {
        self.by_vehicle.get(&vehicle).map_or(&[], Vec::as_slice)
    }

    pub fn pilot_count(&self) -> usize {
        self.linked.len()
    }
}
