use std::time::Duration;

/// Simulation cadence.
///
/// The scheduler waits [`TimeStep::period`] between ticks and runs
/// [`TimeStep::steps_per_tick`] simulation steps each time. Gameplay code is
/// unit-agnostic: one step is one tick, with no delta-time scaling.
pub trait TimeStep: Send + Sync {
    fn period(&self) -> Duration;

    fn steps_per_tick(&self) -> u32 {
        1
    }
}

/// Fixed period, one step per tick. Slow ticks are not compensated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedTimeStep {
    period: Duration,
}

impl FixedTimeStep {
    /// ≈60 Hz.
    pub const DEFAULT_PERIOD_MS: u64 = 16;

    pub const fn new(period: Duration) -> Self {
        Self { period }
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

impl Default for FixedTimeStep {
    fn default() -> Self {
        Self::from_millis(Self::DEFAULT_PERIOD_MS)
    }
}

impl TimeStep for FixedTimeStep {
    fn period(&self) -> Duration {
        self.period
    }
}
