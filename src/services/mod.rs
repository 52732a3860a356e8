//! External service management module
//!
//! This module contains the process-backed alarm sound used by the binary.

pub mod sound;

// Re-export main types
pub use sound::{check_sound_available, CommandPlayback};
