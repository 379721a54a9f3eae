//! The shared logical clock: monotonic ticks, generation-counted leaps, and
//! the bounded branch-ceiling window that reconciles queries issued from
//! different rewind generations.

use std::collections::VecDeque;

use timespace_common::{ClockId, SubjectiveTime};

/// Ceiling sentinel for a generation no later leap has invalidated yet.
const UNCAPPED: u32 = u32::MAX;

/// The canonical source of subjective time for one simulation instance.
///
/// Time moves forward through [`tick`](Clock::tick) and sideways through
/// [`leap`](Clock::leap); nothing else mutates it. Each leap starts a new
/// generation and records a branch ceiling for the window of retained
/// generations, so historical reads issued "as of" an older generation are
/// clamped below any later, stricter rewind and cannot observe invalidated
/// ticks.
///
/// The clock is the sole time authority: slots hold its [`ClockId`], never
/// the clock itself. One clock per simulation thread; no internal
/// synchronization.
#[derive(Debug)]
pub struct Clock {
    id: ClockId,
    now: SubjectiveTime,
    /// One ceiling per retained generation, `ceilings[g - horizon]` for
    /// generation `g`. Monotonically non-increasing over the window's life:
    /// a later rewind can only lower them.
    ceilings: VecDeque<u32>,
    /// Oldest generation still represented in `ceilings`.
    horizon: u32,
    /// Bound shared by the ceiling window and every slot created from this
    /// clock. Fixed for the lifetime of the instance.
    capacity: usize,
}

impl Clock {
    /// Create a clock at tick 0 of generation 0 with the given retention
    /// capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        let mut ceilings = VecDeque::with_capacity(capacity);
        ceilings.push_back(UNCAPPED);
        Self {
            id: ClockId::new(),
            now: SubjectiveTime::ZERO,
            ceilings,
            horizon: 0,
            capacity,
        }
    }

    /// Identity of this clock. Slots bound to it carry the same id.
    pub fn id(&self) -> ClockId {
        self.id
    }

    /// Retention bound shared with every slot bound to this clock.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The current subjective time.
    pub fn subjective_time(&self) -> SubjectiveTime {
        self.now
    }

    /// Current in-generation tick.
    pub fn current(&self) -> u32 {
        self.now.tick
    }

    /// How many times this clock has leapt.
    pub fn generation_count(&self) -> u32 {
        self.now.generation
    }

    /// Oldest generation whose ceiling is still retained. Queries from
    /// earlier generations degrade to raw-tick comparison.
    pub fn branch_horizon(&self) -> u32 {
        self.horizon
    }

    /// Advance one step within the current generation.
    pub fn tick(&mut self) -> SubjectiveTime {
        self.now.tick += 1;
        self.now
    }

    /// Force-set the tick counter to `to`, starting a new generation.
    ///
    /// `to` may be below, at, or above the current tick: a rewind, a restamp,
    /// or a fast-forward. Every retained ceiling is clamped down to `to`
    /// (this rewind invalidates everything past `to` in older generations),
    /// the new generation starts uncapped, and ceilings that fell out of the
    /// capacity window are evicted.
    pub fn leap(&mut self, to: u32) -> SubjectiveTime {
        self.now.generation += 1;
        self.now.tick = to;
        for ceiling in &mut self.ceilings {
            *ceiling = (*ceiling).min(to);
        }
        self.ceilings.push_back(UNCAPPED);
        while self.ceilings.len() > self.capacity {
            self.ceilings.pop_front();
            self.horizon += 1;
        }
        tracing::debug!(
            to,
            generation = self.now.generation,
            horizon = self.horizon,
            "clock leap"
        );
        self.now
    }

    /// Translate an arbitrary (possibly historical) subjective time into the
    /// single tick a slot should floor-search for.
    ///
    /// Queries from generations inside the retained window are clamped to the
    /// ceiling recorded for that generation, so a read issued "as of" an old
    /// generation cannot see ticks invalidated by a later, narrower rewind.
    /// Outside the window no reconciling information survives and the raw
    /// tick is trusted as-is, a documented precision loss at the retention
    /// boundary.
    pub fn time_to_watch(&self, t: SubjectiveTime) -> u32 {
        if t.generation < self.horizon {
            return t.tick;
        }
        match self.ceilings.get((t.generation - self.horizon) as usize) {
            Some(&ceiling) => t.tick.min(ceiling),
            None => t.tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin() {
        let clock = Clock::with_capacity(4);
        assert_eq!(clock.subjective_time(), SubjectiveTime::ZERO);
        assert_eq!(clock.current(), 0);
        assert_eq!(clock.generation_count(), 0);
        assert_eq!(clock.capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_rejected() {
        let _clock = Clock::with_capacity(0);
    }

    #[test]
    fn tick_advances_within_generation() {
        let mut clock = Clock::with_capacity(4);
        let t1 = clock.tick();
        let t2 = clock.tick();
        assert_eq!(t1, SubjectiveTime::new(0, 1));
        assert_eq!(t2, SubjectiveTime::new(0, 2));
        assert_eq!(clock.generation_count(), 0);
    }

    #[test]
    fn leap_starts_new_generation() {
        let mut clock = Clock::with_capacity(4);
        clock.tick();
        clock.tick();
        let t = clock.leap(0);
        assert_eq!(t, SubjectiveTime::new(1, 0));
        assert_eq!(clock.generation_count(), 1);
        assert_eq!(clock.current(), 0);
    }

    #[test]
    fn leap_may_fast_forward() {
        let mut clock = Clock::with_capacity(4);
        let t = clock.leap(100);
        assert_eq!(t, SubjectiveTime::new(1, 100));
    }

    #[test]
    fn unleaped_generation_is_unclamped() {
        let mut clock = Clock::with_capacity(4);
        for _ in 0..5 {
            clock.tick();
        }
        // No leap has happened: historical generation-0 reads resolve to
        // their raw tick.
        assert_eq!(clock.time_to_watch(SubjectiveTime::new(0, 3)), 3);
        assert_eq!(clock.time_to_watch(clock.subjective_time()), 5);
    }

    #[test]
    fn leap_clamps_older_generations() {
        let mut clock = Clock::with_capacity(4);
        for _ in 0..5 {
            clock.tick();
        }
        clock.leap(2);
        // Generation 0 may no longer see past the rewind point.
        assert_eq!(clock.time_to_watch(SubjectiveTime::new(0, 5)), 2);
        assert_eq!(clock.time_to_watch(SubjectiveTime::new(0, 1)), 1);
        // The live generation is uncapped.
        clock.tick();
        assert_eq!(clock.time_to_watch(clock.subjective_time()), 3);
    }

    #[test]
    fn later_narrower_leap_lowers_earlier_ceiling() {
        let mut clock = Clock::with_capacity(4);
        let first = clock.leap(10);
        clock.leap(4);
        // The time returned by the first leap now resolves below the second
        // leap's target.
        assert_eq!(clock.time_to_watch(first), 4);
    }

    #[test]
    fn later_higher_leap_does_not_raise_ceiling() {
        let mut clock = Clock::with_capacity(4);
        let first = clock.leap(4);
        clock.leap(10);
        assert_eq!(clock.time_to_watch(SubjectiveTime::new(1, 9)), 4);
        assert_eq!(clock.time_to_watch(first), 4);
    }

    #[test]
    fn ceiling_window_is_bounded() {
        let mut clock = Clock::with_capacity(3);
        for i in 0..10 {
            clock.leap(i);
        }
        assert_eq!(clock.generation_count(), 10);
        // Only the last `capacity` generations keep ceilings.
        assert_eq!(clock.branch_horizon(), 8);
    }

    #[test]
    fn evicted_generation_degrades_to_raw_tick() {
        let mut clock = Clock::with_capacity(2);
        clock.tick();
        clock.tick();
        clock.leap(0); // clamps generation 0 to 0
        assert_eq!(clock.time_to_watch(SubjectiveTime::new(0, 2)), 0);
        clock.leap(0);
        clock.leap(0);
        // Generation 0 has fallen out of the window: best-effort raw tick.
        assert!(clock.branch_horizon() > 0);
        assert_eq!(clock.time_to_watch(SubjectiveTime::new(0, 2)), 2);
    }

    #[test]
    fn clock_ids_are_distinct() {
        let a = Clock::with_capacity(4);
        let b = Clock::with_capacity(4);
        assert_ne!(a.id(), b.id());
    }
}
