//! Fixed-step scheduling
//!
//! Hosts measure wall time between frames; the simulation only ever sees
//! whole ticks. The accumulator turns one into the other and caps how many
//! ticks a single slow frame may run.

use std::time::Duration;

/// Wall time → tick converter
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl FixedStep {
    /// `ticks_per_second` of 0 is treated as 1
    pub fn new(ticks_per_second: u32, max_substeps: u32) -> Self {
        let rate = ticks_per_second.max(1);
        Self {
            step: Duration::from_secs(1) / rate,
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    #[inline]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add elapsed frame time and return how many ticks are due now.
    ///
    /// Frames longer than `max_substeps` ticks drop the excess instead of
    /// queueing it, so the simulation never tries to catch up unboundedly.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        // Clamp huge gaps (suspended tab, debugger) before accumulating
        let cap = self.step * (self.max_substeps + 1);
        self.accumulator += elapsed.min(cap);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_substeps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Forget any partial tick (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
