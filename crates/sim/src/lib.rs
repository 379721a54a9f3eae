//! Simulation-loop harness around the timespace kernel.
//!
//! A [`Timeline`] is the single owner of one clock and the place where
//! the step contract lives: exactly one `step()` or `rewind(to)` per logical
//! step, before any slot bound to that clock reads or writes for the step.
//!
//! # Invariants
//! - One `Timeline` (and therefore one clock) per simulation thread.
//! - Slots are created through `track` and stay bound to this timeline's
//!   clock for their whole life.

pub mod timeline;

pub use timeline::{Timeline, TimelineSummary};
