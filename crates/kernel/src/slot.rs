//! Per-field value history bound to a shared clock.

use timespace_common::{ClockId, SubjectiveTime};

use crate::clock::Clock;
use crate::ring::TickRing;

/// A bounded, time-indexed history of one tracked value.
///
/// Each slot owns its ring buffer and is bound at creation to exactly one
/// [`Clock`], whose capacity it inherits; it is never re-bound. The clock is
/// passed by reference into every operation — the simulation instance owns
/// the clock, slots only consult it.
///
/// Writes happen at the clock's current subjective time and invalidate all
/// strictly-later history (rewinding then writing forks the timeline). Reads
/// resolve any retained past instant with floor semantics: the latest value
/// not after the queried time.
#[derive(Debug)]
pub struct TemporalSlot<T> {
    clock_id: ClockId,
    history: TickRing<T>,
    /// Generation at the time of the most recent write; enables the O(1)
    /// same-instant fast path.
    last_write_generation: u32,
}

impl<T> TemporalSlot<T> {
    /// Create an empty slot bound to `clock`, inheriting its capacity.
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock_id: clock.id(),
            history: TickRing::with_capacity(clock.capacity()),
            last_write_generation: clock.subjective_time().generation,
        }
    }

    /// Number of retained history entries.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether this slot has any retained history.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Record `value` at the clock's current subjective time.
    ///
    /// A repeated write within one step overwrites in place. Otherwise the
    /// floor for the current time is located, everything after it is
    /// discarded, and the new entry is appended; the oldest entry is evicted
    /// once capacity is exceeded.
    pub fn write(&mut self, clock: &Clock, value: T) {
        debug_assert_eq!(
            self.clock_id,
            clock.id(),
            "slot used with a clock it was not bound to"
        );
        let t = clock.subjective_time();
        if self.last_write_generation == t.generation {
            if let Some(last) = self.history.last_mut() {
                if last.0 == t.tick {
                    // Same instant, same branch: redundant write.
                    last.1 = value;
                    return;
                }
            }
        }
        let watch = clock.time_to_watch(t);
        let keep = match self.history.floor_search(watch) {
            // Re-writing a tick already in history replaces the entry so the
            // live range stays strictly tick-ordered.
            Some(idx) if self.history.get(idx).map(|e| e.0) == Some(t.tick) => idx,
            Some(idx) => idx + 1,
            None => 0,
        };
        self.history.truncate_to(keep);
        self.history.push(t.tick, value);
        self.last_write_generation = t.generation;
    }

    /// The value as of the clock's current subjective time.
    pub fn read(&self, clock: &Clock) -> Option<&T> {
        self.read_as_of(clock, clock.subjective_time())
    }

    /// The value as of an arbitrary, possibly historical, subjective time.
    ///
    /// Returns `None` when nothing was ever written, or when every retained
    /// entry is newer than the (ceiling-clamped) query.
    pub fn read_as_of(&self, clock: &Clock, t: SubjectiveTime) -> Option<&T> {
        debug_assert_eq!(
            self.clock_id,
            clock.id(),
            "slot used with a clock it was not bound to"
        );
        if self.last_write_generation == t.generation {
            if let Some(last) = self.history.last() {
                if last.0 == t.tick {
                    return Some(&last.1);
                }
            }
        }
        let watch = clock.time_to_watch(t);
        self.history
            .floor_search(watch)
            .and_then(|idx| self.history.get(idx))
            .map(|(_, value)| value)
    }
}
