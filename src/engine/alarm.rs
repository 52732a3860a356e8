//! Alarm lifecycle: looping playback with an automatic stop ceiling

use std::{fmt::Debug, path::PathBuf, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::driver::{Scheduler, TimeoutHandle};

/// Default time the alarm may ring before it stops itself
pub const ALARM_CEILING: Duration = Duration::from_secs(60);

/// Reasons looping playback could not begin
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("sound file not found: {}", .0.display())]
    MissingSound(PathBuf),

    #[error("failed to start player `{player}`: {reason}")]
    Spawn { player: String, reason: String },
}

/// Looping sound output owned by the alarm
pub trait Playback: Send + Debug {
    /// Move the play position back to the start of the sound
    fn rewind(&mut self);

    /// Begin looped playback
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Halt playback, keeping the current position
    fn pause(&mut self);
}

/// Owns the playback handle and the automatic stop schedule
#[derive(Debug)]
pub struct AlarmController {
    playback: Box<dyn Playback>,
    scheduler: Box<dyn Scheduler>,
    ceiling: Duration,
    active: bool,
    auto_stop: Option<TimeoutHandle>,
}

impl AlarmController {
    pub fn new(playback: Box<dyn Playback>, scheduler: Box<dyn Scheduler>) -> Self {
        Self {
            playback,
            scheduler,
            ceiling: ALARM_CEILING,
            active: false,
            auto_stop: None,
        }
    }

    /// Override the automatic stop ceiling
    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Whether the alarm is considered ringing, even if playback was blocked
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start looped playback from the top and arm the automatic stop
    pub fn trigger(&mut self) {
        if self.active {
            debug!("Alarm already active, ignoring trigger");
            return;
        }

        self.active = true;
        self.playback.rewind();
        if let Err(e) = self.playback.play() {
            warn!("Alarm playback failed to start: {}", e);
        }

        // Armed whether or not playback started
        self.auto_stop = Some(self.scheduler.schedule(self.ceiling));
        info!("Alarm triggered, auto-stop in {}s", self.ceiling.as_secs());
    }

    /// Halt playback and cancel the automatic stop. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(handle) = self.auto_stop.take() {
            self.scheduler.cancel(handle);
        }

        if self.active {
            info!("Alarm stopped");
        }
        self.active = false;
        self.playback.pause();
        self.playback.rewind();
    }

    /// Scheduled callback for the automatic stop.
    ///
    /// Returns true when this timeout is the pending one and stopped the alarm.
    pub fn on_timeout(&mut self, handle: TimeoutHandle) -> bool {
        if self.auto_stop != Some(handle) {
            debug!("Ignoring stale alarm timeout {}", handle.id());
            return false;
        }

        info!("Alarm ceiling reached, stopping playback");
        self.stop();
        true
    }
}
