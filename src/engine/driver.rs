//! Scheduling capabilities the engine consumes
//!
//! The engine never sleeps or spawns. It asks an [`AnimationDriver`] for the
//! next frame and a [`Scheduler`] for delayed callbacks, keeps the returned
//! handle, and the host hands the handle back when the callback is due.

use std::{fmt::Debug, time::Duration};

/// Handle for one requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Handle for one scheduled timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutHandle(u64);

impl TimeoutHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Runs a callback before the next render frame.
///
/// Requests are one-shot: a frame that wants another frame must ask again.
pub trait AnimationDriver: Send + Debug {
    /// Request a single callback on the next frame
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a requested frame. Cancelling a delivered or already cancelled
    /// frame does nothing.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Runs a callback once after a delay.
pub trait Scheduler: Send + Debug {
    /// Schedule a single callback after `delay`
    fn schedule(&mut self, delay: Duration) -> TimeoutHandle;

    /// Cancel a scheduled callback. Safe to call on fired or cancelled handles.
    fn cancel(&mut self, handle: TimeoutHandle);
}
