//! Fixed-capacity ring buffer of tick-stamped entries.
//!
//! Backs every [`TemporalSlot`](crate::slot::TemporalSlot). The live range is
//! kept strictly tick-ordered by the slot's truncate-then-append write policy,
//! which is what makes the binary floor search valid.

/// A circular buffer of `(tick, value)` entries with capacity fixed at
/// construction.
///
/// `begin`/`end` are physical cursors into `capacity + 1` slots, so
/// `begin == end` unambiguously means empty while a full buffer still holds
/// `capacity` entries. Pushing into a full buffer evicts the oldest entry;
/// bounded retention is the design, not a failure.
#[derive(Debug, Clone)]
pub struct TickRing<T> {
    slots: Vec<Option<(u32, T)>>,
    begin: usize,
    end: usize,
}

impl<T> TickRing<T> {
    /// Create an empty ring retaining at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.resize_with(capacity + 1, || None);
        Self {
            slots,
            begin: 0,
            end: 0,
        }
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        (self.end + self.slots.len() - self.begin) % self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Entry at logical index `idx` (0 = oldest retained).
    pub fn get(&self, idx: usize) -> Option<&(u32, T)> {
        if idx >= self.len() {
            return None;
        }
        self.slots[(self.begin + idx) % self.slots.len()].as_ref()
    }

    /// The newest live entry.
    pub fn last(&self) -> Option<&(u32, T)> {
        self.len().checked_sub(1).and_then(|idx| self.get(idx))
    }

    /// Mutable access to the newest live entry.
    pub fn last_mut(&mut self) -> Option<&mut (u32, T)> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let phys = (self.begin + len - 1) % self.slots.len();
        self.slots[phys].as_mut()
    }

    /// Tick of the entry at logical index `idx`.
    ///
    /// Callers must pass an index inside the live range; entries there are
    /// always initialized.
    fn tick_at(&self, idx: usize) -> u32 {
        self.get(idx).expect("index inside live range").0
    }

    /// Binary floor search: logical index of the entry with the greatest
    /// stored tick `<= tick`.
    ///
    /// Returns `None` when the buffer is empty or every stored tick is newer
    /// than the query. Ties break to the floor, never the nearest entry:
    /// consumers depend on "latest value not after this time".
    pub fn floor_search(&self, tick: u32) -> Option<usize> {
        if self.is_empty() || self.tick_at(0) > tick {
            return None;
        }
        let mut lo = 0;
        let mut hi = self.len();
        // Invariant: tick_at(lo) <= tick < tick_at(hi) (hi one past the end).
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.tick_at(mid) <= tick {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Some(lo)
    }

    /// Drop every entry at logical index `>= len`, keeping the oldest `len`.
    pub fn truncate_to(&mut self, len: usize) {
        let phys = self.slots.len();
        while self.len() > len {
            self.end = (self.end + phys - 1) % phys;
            self.slots[self.end] = None;
        }
    }

    /// Append an entry, evicting the oldest one when at capacity.
    pub fn push(&mut self, tick: u32, value: T) {
        let phys = self.slots.len();
        if self.len() == self.capacity() {
            self.slots[self.begin] = None;
            self.begin = (self.begin + 1) % phys;
        }
        self.slots[self.end] = Some((tick, value));
        self.end = (self.end + 1) % phys;
    }
}
