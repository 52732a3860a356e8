//! Monotonic time source for the countdown

use std::{fmt::Debug, time::Duration};
use tokio::time::Instant;

/// Supplies elapsed time since an arbitrary origin.
///
/// Only ever used to measure intervals, never as wall-clock time.
pub trait Clock: Send + Sync + Debug {
    /// Time since the clock's origin. Never goes backward.
    fn now(&self) -> Duration;
}

/// Clock backed by `tokio::time::Instant`, so paused-time tests can move it
/// with `tokio::time::advance`.
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is the current instant
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
