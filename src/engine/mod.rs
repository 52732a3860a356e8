//! Countdown engine module
//!
//! The engine is a synchronous state machine. Time, frame scheduling,
//! timeouts, drawing and sound are supplied by the host through the traits
//! re-exported here.

pub mod alarm;
pub mod clock;
pub mod countdown;
pub mod driver;
pub mod input;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use alarm::{AlarmController, Playback, PlaybackError, ALARM_CEILING};
pub use clock::{Clock, MonotonicClock};
pub use countdown::{whole_seconds, CountdownEngine};
pub use driver::{AnimationDriver, FrameHandle, Scheduler, TimeoutHandle};
pub use input::{Field, InputAdjuster};
pub use render::{circumference, format_digits, ring_arc, Digits, RenderSink, RingArc};
