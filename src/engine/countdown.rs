//! Countdown engine: run state machine and drift-free remaining time
//!
//! Remaining time is always derived from a fixed [`RunAnchor`] plus the
//! elapsed clock time, never by decrementing a counter per frame, so dropped
//! or late frames catch up instead of losing time.

use std::{sync::Arc, time::Duration};

use tracing::{debug, info};

use super::{
    alarm::AlarmController,
    clock::Clock,
    driver::{AnimationDriver, FrameHandle, TimeoutHandle},
    input::{Field, InputAdjuster},
    render::{format_digits, ring_arc, RenderSink},
};
use crate::state::{RunState, TimerSnapshot};

/// Clock reading and remaining time captured when running began
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunAnchor {
    at: Duration,
    remaining: Duration,
}

/// Internal phase. The anchor and frame subscription only exist while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { anchor: RunAnchor, frame: FrameHandle },
    Paused,
    Alarming,
}

/// Whole seconds in `remaining`, rounded up
pub fn whole_seconds(remaining: Duration) -> u64 {
    u64::try_from(remaining.as_nanos().div_ceil(1_000_000_000)).unwrap_or(u64::MAX)
}

/// The single countdown instance
#[derive(Debug)]
pub struct CountdownEngine {
    phase: Phase,
    preset: u64,
    total: u64,
    /// Precise remaining time as of the last tick or command
    remaining: Duration,
    /// Whole second currently on the readout, `None` forces the next tick to redraw
    shown_seconds: Option<u64>,
    fraction: f64,
    input: InputAdjuster,
    alarm: AlarmController,
    clock: Arc<dyn Clock>,
    driver: Box<dyn AnimationDriver>,
    sink: Box<dyn RenderSink>,
}

impl CountdownEngine {
    /// Create an idle engine at 00:00:00 and draw its initial frame
    pub fn new(
        clock: Arc<dyn Clock>,
        driver: Box<dyn AnimationDriver>,
        sink: Box<dyn RenderSink>,
        alarm: AlarmController,
    ) -> Self {
        let mut engine = Self {
            phase: Phase::Idle,
            preset: 0,
            total: 0,
            remaining: Duration::ZERO,
            shown_seconds: None,
            fraction: 1.0,
            input: InputAdjuster::new(),
            alarm,
            clock,
            driver,
            sink,
        };
        engine.render_digits(0);
        engine.render_ring(1.0);
        engine
    }

    pub fn run_state(&self) -> RunState {
        match self.phase {
            Phase::Idle => RunState::Idle,
            Phase::Running { .. } => RunState::Running,
            Phase::Paused => RunState::Paused,
            Phase::Alarming => RunState::Alarming,
        }
    }

    pub fn selected_field(&self) -> Field {
        self.input.selected()
    }

    /// Move the plus/minus cursor
    pub fn select_field(&mut self, field: Field) {
        if self.input.select(field) {
            debug!("Selected field: {}", field);
        }
    }

    /// Adjust the selected field by `delta`
    pub fn adjust(&mut self, delta: i64) {
        let field = self.input.selected();
        self.configure(field, delta);
    }

    /// Adjust one unit of the preset. Ignored unless idle.
    pub fn configure(&mut self, field: Field, delta: i64) {
        if self.phase != Phase::Idle {
            debug!("Ignoring configure {} {:+} while {}", field, delta, self.run_state());
            return;
        }

        let current = whole_seconds(self.remaining);
        let Some(seconds) = self.input.apply(field, delta, current) else {
            debug!("Field {} is not adjustable", field);
            return;
        };

        self.preset = seconds;
        self.total = seconds;
        self.remaining = Duration::from_secs(seconds);
        self.render_digits(seconds);
        self.render_ring(1.0);
        debug!("Preset set to {}", format_digits(seconds));
    }

    /// Begin or resume counting down
    pub fn start(&mut self) {
        match self.phase {
            Phase::Running { .. } => {
                debug!("Already running, ignoring start");
                return;
            }
            Phase::Alarming => {
                debug!("Alarm active, ignoring start");
                return;
            }
            Phase::Idle | Phase::Paused => {}
        }

        if self.remaining.is_zero() {
            debug!("Nothing to count down, ignoring start");
            return;
        }
        if self.total == 0 {
            self.total = whole_seconds(self.remaining);
        }

        let anchor = RunAnchor {
            at: self.clock.now(),
            remaining: self.remaining,
        };
        let frame = self.driver.request_frame();
        self.phase = Phase::Running { anchor, frame };
        self.shown_seconds = None;
        info!("Countdown running from {}", format_digits(whole_seconds(self.remaining)));
    }

    /// Stop ticking and keep the remaining time from the most recent tick
    pub fn pause(&mut self) {
        let Phase::Running { frame, .. } = self.phase else {
            debug!("Not running, ignoring pause");
            return;
        };

        self.driver.cancel_frame(frame);
        self.phase = Phase::Paused;
        info!("Countdown paused at {}", format_digits(whole_seconds(self.remaining)));
    }

    /// Return to the preset from any state, silencing the alarm
    pub fn reset_to_preset(&mut self) {
        self.alarm.stop();
        if let Phase::Running { frame, .. } = self.phase {
            self.driver.cancel_frame(frame);
        }

        self.phase = Phase::Idle;
        self.total = self.preset;
        self.remaining = Duration::from_secs(self.preset);
        self.render_digits(self.preset);
        self.render_ring(1.0);
        info!("Countdown reset to {}", format_digits(self.preset));
    }

    /// Main button: stop while alarming, pause while running, otherwise start
    pub fn toggle(&mut self) {
        match self.phase {
            Phase::Alarming => self.reset_to_preset(),
            Phase::Running { .. } => self.pause(),
            Phase::Idle | Phase::Paused => self.start(),
        }
    }

    /// Animation frame callback
    pub fn on_frame(&mut self, handle: FrameHandle, now: Duration) {
        let Phase::Running { anchor, frame } = self.phase else {
            debug!("Ignoring frame {} while {}", handle.id(), self.run_state());
            return;
        };
        if frame != handle {
            debug!("Ignoring stale frame {}", handle.id());
            return;
        }

        let elapsed = now.saturating_sub(anchor.at);
        let remaining = anchor.remaining.saturating_sub(elapsed);
        self.remaining = remaining;

        // The terminal frame is drawn once, by expire()
        if remaining.is_zero() {
            self.expire();
            return;
        }

        let fraction = if self.total > 0 {
            remaining.as_secs_f64() / self.total as f64
        } else {
            1.0
        };
        self.render_ring(fraction);

        let seconds = whole_seconds(remaining);
        if self.shown_seconds != Some(seconds) {
            self.render_digits(seconds);
        }

        let frame = self.driver.request_frame();
        self.phase = Phase::Running { anchor, frame };
    }

    /// Automatic alarm stop callback.
    ///
    /// A silenced alarm leaves the engine idle at 00:00:00, so the duration
    /// can be adjusted again without a reset.
    pub fn on_alarm_timeout(&mut self, handle: TimeoutHandle) {
        if self.alarm.on_timeout(handle) && self.phase == Phase::Alarming {
            self.phase = Phase::Idle;
            info!("Alarm silenced by ceiling, timer idle");
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let state = self.run_state();
        let remaining_seconds = whole_seconds(self.remaining);
        let shown = self.shown_seconds.unwrap_or(remaining_seconds);

        TimerSnapshot {
            state,
            control: state.control(),
            selected_field: self.input.selected(),
            preset_seconds: self.preset,
            total_seconds: self.total,
            remaining_seconds,
            remaining_ms: u64::try_from(self.remaining.as_millis()).unwrap_or(u64::MAX),
            display: format_digits(shown).to_string(),
            fraction: self.fraction,
            alarm_sounding: self.alarm.is_active(),
        }
    }

    fn expire(&mut self) {
        // The expiring frame was delivered, so there is nothing to cancel
        self.phase = Phase::Alarming;
        self.remaining = Duration::ZERO;
        self.render_digits(0);
        self.render_ring(0.0);
        info!("Countdown finished");
        self.alarm.trigger();
    }

    fn render_digits(&mut self, seconds: u64) {
        self.shown_seconds = Some(seconds);
        self.sink.digits(format_digits(seconds));
    }

    fn render_ring(&mut self, fraction: f64) {
        let arc = ring_arc(fraction);
        self.fraction = arc.fraction;
        self.sink.ring(arc);
    }
}
