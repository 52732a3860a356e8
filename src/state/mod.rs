//! State management module
//!
//! This module contains the shared application state and the timer data
//! structures exposed to the API.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, WatchSink};
pub use timer_state::{Control, RunState, TimerSnapshot, TimerView};
