//! Shared time types used across the timespace engine.
//!
//! # Invariants
//! - `SubjectiveTime` ordering is only defined within a generation.
//! - A `ClockId` identifies exactly one clock for the lifetime of a process.

pub mod types;

pub use types::{ClockId, SubjectiveTime};
