//! Timespace kernel: the branch-aware clock and bounded per-field value
//! histories that make simulated time rewindable.
//!
//! A single [`Clock`] owns the canonical notion of subjective time for one
//! simulation instance. Any number of [`TemporalSlot`]s reference that clock
//! and keep a bounded, tick-ordered history of one tracked value each, so the
//! value as of any retained past instant can be read back even after the
//! clock has been rewound.
//!
//! # Invariants
//! - All time mutation flows through `Clock::tick` and `Clock::leap`.
//! - A slot's live history range is strictly tick-ordered.
//! - Memory is bounded by the clock's capacity: both the ceiling window and
//!   every slot history evict their oldest entry rather than grow.

pub mod clock;
pub mod ring;
pub mod slot;

pub use clock::Clock;
pub use slot::TemporalSlot;
pub use timespace_common::{ClockId, SubjectiveTime};
