//! Pure renderers for the progress ring and the digital readout

use std::{f64::consts::PI, fmt};

use serde::{Deserialize, Serialize};

/// Radius of the progress ring
pub const RING_RADIUS: f64 = 80.0;

/// Full arc length of the progress ring
pub fn circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// Drawn/undrawn split of the progress ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingArc {
    /// Remaining fraction after clamping: 1 is full time left, 0 is expired
    pub fraction: f64,
    pub drawn: f64,
    pub undrawn: f64,
}

impl RingArc {
    pub fn full() -> Self {
        ring_arc(1.0)
    }
}

/// Map a remaining fraction to an arc length. Input is clamped to [0, 1].
pub fn ring_arc(fraction: f64) -> RingArc {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let total = circumference();
    let drawn = fraction * total;

    RingArc {
        fraction,
        drawn,
        undrawn: total - drawn,
    }
}

/// Zero-padded hour, minute and second fields of the readout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digits {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

/// Split whole seconds into (hours, minutes, seconds)
pub fn split_hms(total_seconds: u64) -> (u64, u64, u64) {
    (
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60,
    )
}

/// Format whole seconds as two-digit fields. Hours past 99 keep all digits.
pub fn format_digits(total_seconds: u64) -> Digits {
    let (hours, minutes, seconds) = split_hms(total_seconds);
    Digits {
        hours: format!("{:02}", hours),
        minutes: format!("{:02}", minutes),
        seconds: format!("{:02}", seconds),
    }
}

/// Surface the engine draws onto
pub trait RenderSink: Send + fmt::Debug {
    fn ring(&mut self, arc: RingArc);
    fn digits(&mut self, digits: Digits);
}
