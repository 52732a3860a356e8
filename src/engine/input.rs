//! Field selection and duration adjustment

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::render::split_hms;

/// Adjustable unit of the preset duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[serde(alias = "hh")]
    Hours,
    #[serde(alias = "mm")]
    Minutes,
    /// Selectable in the UI, never adjustable
    #[serde(alias = "ss")]
    Seconds,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Hours => "hours",
            Field::Minutes => "minutes",
            Field::Seconds => "seconds",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" | "hh" => Ok(Field::Hours),
            "minutes" | "mm" => Ok(Field::Minutes),
            "seconds" | "ss" => Ok(Field::Seconds),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// Selection cursor routing plus/minus to hours or minutes
#[derive(Debug, Clone)]
pub struct InputAdjuster {
    selected: Field,
}

impl InputAdjuster {
    /// Start with hours selected
    pub fn new() -> Self {
        Self {
            selected: Field::Hours,
        }
    }

    pub fn selected(&self) -> Field {
        self.selected
    }

    /// Move the cursor. Selecting seconds leaves it where it is.
    pub fn select(&mut self, field: Field) -> bool {
        if field == Field::Seconds {
            debug!("Seconds field is not adjustable, keeping {} selected", self.selected);
            return false;
        }
        self.selected = field;
        true
    }

    /// Apply `delta` to one unit of `current_seconds` and return the new total.
    ///
    /// Hours floor at zero with no ceiling, minutes clamp to [0, 59] without
    /// carrying into hours, seconds are carried over untouched. Returns `None`
    /// for the seconds field.
    pub fn apply(&self, field: Field, delta: i64, current_seconds: u64) -> Option<u64> {
        let (mut hours, mut minutes, seconds) = split_hms(current_seconds);

        match field {
            Field::Hours => hours = hours.saturating_add_signed(delta),
            Field::Minutes => {
                minutes = (minutes as i64).saturating_add(delta).clamp(0, 59) as u64;
            }
            Field::Seconds => return None,
        }

        Some(
            hours
                .saturating_mul(3600)
                .saturating_add(minutes * 60)
                .saturating_add(seconds),
        )
    }
}

impl Default for InputAdjuster {
    fn default() -> Self {
        Self::new()
    }
}
