use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Unique identifier for a clock instance.
///
/// Slots record the id of the clock they were created against so that a slot
/// is never resolved through a foreign clock's ceiling table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockId(pub Uuid);

impl ClockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClockId {
    fn default() -> Self {
        Self::new()
    }
}

/// A logical instant of subjective time: a branch generation plus the
/// in-generation step counter.
///
/// `generation` counts how many times the clock has been force-set to a
/// non-sequential tick (a leap); `tick` counts ordinary steps within that
/// generation. Timestamps from different generations are not directly
/// comparable — reconciling them requires the clock's branch-ceiling table —
/// so `PartialOrd` returns `None` across generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectiveTime {
    /// In-generation logical step counter.
    pub tick: u32,
    /// Leap count: how many times the clock has branched.
    pub generation: u32,
}

impl SubjectiveTime {
    /// The origin of subjective time: tick 0 of generation 0.
    pub const ZERO: Self = Self {
        tick: 0,
        generation: 0,
    };

    pub fn new(generation: u32, tick: u32) -> Self {
        Self { tick, generation }
    }
}

impl PartialOrd for SubjectiveTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.generation == other.generation).then(|| self.tick.cmp(&other.tick))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_id_uniqueness() {
        let a = ClockId::new();
        let b = ClockId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn subjective_time_ordered_within_generation() {
        let early = SubjectiveTime::new(1, 3);
        let late = SubjectiveTime::new(1, 7);
        assert!(early < late);
        assert!(late > early);
    }

    #[test]
    fn subjective_time_incomparable_across_generations() {
        let gen0 = SubjectiveTime::new(0, 10);
        let gen1 = SubjectiveTime::new(1, 2);
        assert_eq!(gen0.partial_cmp(&gen1), None);
        assert!(!(gen0 < gen1));
        assert!(!(gen0 > gen1));
    }

    #[test]
    fn subjective_time_zero() {
        assert_eq!(SubjectiveTime::ZERO, SubjectiveTime::new(0, 0));
    }
}
