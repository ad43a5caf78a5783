//! Input coalescing
//!
//! Keyboard, pointer and touch presses all mean the same thing: flap (or
//! start). They land in a single-slot latch that the next tick drains, so
//! one gesture reported by several channels still flaps once and no press
//! can mutate the world mid-tick.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// Where a press came from (logging only; all sources are equivalent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    Keyboard,
    Pointer,
    Touch,
    /// Replayed from an `InputScript`
    Script,
}

/// Edge-triggered pending-flap flag.
///
/// `press` may be called from any thread (share it behind an `Arc`); `take`
/// is called once per tick by the owner of the game state.
#[derive(Debug, Default)]
pub struct InputLatch {
    pending: AtomicBool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns false if a press was already pending and this
    /// one was folded into it.
    pub fn press(&self, source: InputSource) -> bool {
        let fresh = !self.pending.swap(true, Ordering::AcqRel);
        if fresh {
            log::trace!("Flap latched from {:?}", source);
        } else {
            log::trace!("Coalesced duplicate press from {:?}", source);
        }
        fresh
    }

    /// Consume the pending press, if any
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// Flap presses keyed by the tick index they should be consumed on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputScript {
    /// Sorted, deduplicated tick indices
    ticks: Vec<u64>,
}

impl InputScript {
    pub fn new(mut ticks: Vec<u64>) -> Self {
        ticks.sort_unstable();
        ticks.dedup();
        Self { ticks }
    }

    /// A press every `interval` ticks starting at `first`, up to `until` (exclusive)
    pub fn every(first: u64, interval: u64, until: u64) -> Self {
        let interval = interval.max(1);
        Self {
            ticks: (first..until).step_by(interval as usize).collect(),
        }
    }

    pub fn fires_at(&self, tick: u64) -> bool {
        self.ticks.binary_search(&tick).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Last scripted tick, if any
    pub fn last_tick(&self) -> Option<u64> {
        self.ticks.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_coalesces_presses() {
        let latch = InputLatch::new();
        assert!(!latch.take());

        assert!(latch.press(InputSource::Touch));
        // the same gesture also reported as a pointer press
        assert!(!latch.press(InputSource::Pointer));
        assert!(latch.is_pending());

        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_latch_across_threads() {
        use std::sync::Arc;

        let latch = Arc::new(InputLatch::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let latch = Arc::clone(&latch);
                std::thread::spawn(move || latch.press(InputSource::Keyboard))
            })
            .collect();
        let fresh = handles
            .into_iter()
            .map(|h| h.join().unwrap_or(false))
            .filter(|&f| f)
            .count();

        assert_eq!(fresh, 1);
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_script_sorts_and_dedups() {
        let script = InputScript::new(vec![30, 0, 15, 15]);
        assert!(script.fires_at(0));
        assert!(script.fires_at(15));
        assert!(script.fires_at(30));
        assert!(!script.fires_at(16));
        assert_eq!(script.last_tick(), Some(30));
    }

    #[test]
    fn test_script_every() {
        let script = InputScript::every(2, 10, 35);
        assert!(script.fires_at(2));
        assert!(script.fires_at(12));
        assert!(script.fires_at(32));
        assert!(!script.fires_at(42));
        assert!(InputScript::every(0, 5, 0).is_empty());
    }
}
