use timespace_common::SubjectiveTime;
use timespace_kernel::{Clock, TemporalSlot};

/// Sole owner of a simulation's clock.
///
/// The owning loop drives time exclusively through [`step`](Timeline::step)
/// and [`rewind`](Timeline::rewind), then lets tracked slots read and write
/// against [`clock`](Timeline::clock). All slots observing one timeline see
/// the same subjective time within a step, which is what keeps them mutually
/// consistent.
#[derive(Debug)]
pub struct Timeline {
    clock: Clock,
    steps: u64,
    rewinds: u64,
}

impl Timeline {
    /// Create a timeline whose clock and slots retain `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            clock: Clock::with_capacity(capacity),
            steps: 0,
            rewinds: 0,
        }
    }

    /// The clock slots resolve their reads and writes through.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Create a slot bound to this timeline's clock.
    pub fn track<T>(&self) -> TemporalSlot<T> {
        TemporalSlot::new(&self.clock)
    }

    /// Advance one logical step within the current generation.
    pub fn step(&mut self) -> SubjectiveTime {
        self.steps += 1;
        let now = self.clock.tick();
        tracing::trace!(tick = now.tick, generation = now.generation, "step");
        now
    }

    /// Rewind (or rebase) the timeline to tick `to`, starting a new
    /// generation. Counts as the one time-advance of its logical step.
    pub fn rewind(&mut self, to: u32) -> SubjectiveTime {
        self.steps += 1;
        self.rewinds += 1;
        tracing::debug!(to, "rewinding timeline");
        self.clock.leap(to)
    }

    /// Total logical steps driven so far (ticks plus rewinds).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// How many of those steps were rewinds.
    pub fn rewinds(&self) -> u64 {
        self.rewinds
    }

    /// Read-only summary for tooling and logs.
    pub fn summary(&self) -> TimelineSummary {
        TimelineSummary {
            tick: self.clock.current(),
            generation: self.clock.generation_count(),
            branch_horizon: self.clock.branch_horizon(),
            capacity: self.clock.capacity(),
            steps: self.steps,
            rewinds: self.rewinds,
        }
    }
}

/// Snapshot of a timeline's state for debugging and CLI output.
#[derive(Debug, Clone)]
pub struct TimelineSummary {
    pub tick: u32,
    pub generation: u32,
    pub branch_horizon: u32,
    pub capacity: usize,
    pub steps: u64,
    pub rewinds: u64,
}

impl std::fmt::Display for TimelineSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Timeline: tick={} generation={} horizon={} capacity={} steps={} rewinds={}",
            self.tick, self.generation, self.branch_horizon, self.capacity, self.steps, self.rewinds
        )
    }
}
