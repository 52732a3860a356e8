//! Background tasks module
//!
//! This module contains the runtime side of the timer: the frame driver,
//! the alarm timeout scheduler and the wiring that connects them to the
//! engine.

pub mod alarm_timeouts;
pub mod frame_driver;
pub mod runtime;

// Re-export main functions
pub use alarm_timeouts::{alarm_timeout_task, TokioScheduler};
pub use frame_driver::{frame_driver_task, TokioFrameDriver, FRAME_INTERVAL};
pub use runtime::{start_timer_runtime, RuntimeOptions};
