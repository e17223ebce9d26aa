// SPDX-License-Identifier: GPL-3.0-only

//! Time source for animations
//!
//! Animations are sampled against a [`Clock`] rather than `Instant::now()`
//! directly so that tests and the headless simulator can step time by hand.

use std::fmt::Debug;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        let origin = Instant::now();
        Self {
            origin,
            now: Mutex::new(origin),
        }
    }

    /// Move time forward
    ///
    /// Returns `false` and leaves the clock alone if the result would not be
    /// representable.
    pub fn advance(&self, by: Duration) -> bool {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        match now.checked_add(by) {
            Some(next) => {
                *now = next;
                true
            }
            None => false,
        }
    }

    /// Jump to `offset` after creation; never moves backwards
    ///
    /// Returns `false` and leaves the clock alone if `offset` is too large
    /// to represent.
    pub fn set_elapsed(&self, offset: Duration) -> bool {
        let Some(target) = self.origin.checked_add(offset) else {
            return false;
        };
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = (*now).max(target);
        true
    }

    /// Time since creation
    pub fn elapsed(&self) -> Duration {
        self.now() - self.origin
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        let start = clock.now();
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - start, Duration::from_millis(250));
        assert_eq!(clock.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn test_set_elapsed_is_monotonic() {
        let clock = ManualClock::new();
        clock.set_elapsed(Duration::from_secs(2));
        clock.set_elapsed(Duration::from_secs(1));
        assert_eq!(clock.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn test_unrepresentable_offset_is_rejected() {
        let clock = ManualClock::new();
        clock.set_elapsed(Duration::from_secs(1));
        assert!(!clock.set_elapsed(Duration::MAX));
        assert!(!clock.advance(Duration::MAX));
        assert_eq!(clock.elapsed(), Duration::from_secs(1));
    }
}
