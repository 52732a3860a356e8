//! Timer state structures shared by the engine and the API

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::{Digits, Field, RingArc};

/// Lifecycle of the single countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Paused,
    Alarming,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Alarming => "alarming",
        }
    }

    /// Glyph the main button shows in this state
    pub fn control(&self) -> Control {
        match self {
            RunState::Idle | RunState::Paused => Control::Play,
            RunState::Running => Control::Pause,
            RunState::Alarming => Control::Stop,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main button glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Play,
    Pause,
    Stop,
}

/// Point-in-time view of the countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: RunState,
    pub control: Control,
    pub selected_field: Field,
    pub preset_seconds: u64,
    pub total_seconds: u64,
    /// Whole seconds left, rounded up
    pub remaining_seconds: u64,
    pub remaining_ms: u64,
    pub display: String,
    pub fraction: f64,
    /// Whether the alarm is ringing (or blocked but not yet acknowledged)
    pub alarm_sounding: bool,
}

/// Latest frame drawn by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub ring: RingArc,
    pub digits: Digits,
}

impl TimerView {
    pub fn new() -> Self {
        Self {
            ring: RingArc::full(),
            digits: crate::engine::format_digits(0),
        }
    }
}

impl Default for TimerView {
    fn default() -> Self {
        Self::new()
    }
}
