//! Process-level helpers
//!
//! Shutdown signal handling used by the server loop in `main`.

pub mod signals;

pub use signals::shutdown_signal;
