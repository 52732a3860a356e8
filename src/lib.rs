//! Ring Timer - A countdown timer service with a progress ring and alarm
//!
//! This library provides the countdown engine (run state machine, drift-free
//! remaining time, alarm lifecycle) and the tokio/axum runtime that drives it.

pub mod config;
pub mod engine;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::CountdownEngine;
pub use state::AppState;
pub use api::create_router;
pub use tasks::start_timer_runtime;
pub use utils::signals::shutdown_signal;
