//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info};

use super::{TimerSnapshot, TimerView};
use crate::engine::{CountdownEngine, Digits, Field, FrameHandle, RenderSink, RingArc, TimeoutHandle};

/// Render sink publishing every drawn frame on a watch channel
#[derive(Debug)]
pub struct WatchSink {
    view_tx: watch::Sender<TimerView>,
}

impl WatchSink {
    /// Create a sink and the receiver that observes it
    pub fn new() -> (Self, watch::Receiver<TimerView>) {
        let (view_tx, view_rx) = watch::channel(TimerView::new());
        (Self { view_tx }, view_rx)
    }
}

impl RenderSink for WatchSink {
    fn ring(&mut self, arc: RingArc) {
        self.view_tx.send_modify(|view| view.ring = arc);
    }

    fn digits(&mut self, digits: Digits) {
        self.view_tx.send_modify(|view| view.digits = digits);
    }
}

/// Main application state owning the countdown engine
#[derive(Debug)]
pub struct AppState {
    /// The single countdown; every mutation goes through its command methods
    pub engine: Arc<Mutex<CountdownEngine>>,
    /// Latest frame drawn by the engine
    pub view_rx: watch::Receiver<TimerView>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around an engine
    pub fn new(
        port: u16,
        host: String,
        engine: CountdownEngine,
        view_rx: watch::Receiver<TimerView>,
    ) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            view_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Run a user command against the engine and record it as the last action
    pub fn command<F>(&self, action: &str, command: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut CountdownEngine),
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let before = engine.run_state();
        command(&mut *engine);
        let snapshot = engine.snapshot();
        drop(engine); // Release the lock early

        if before != snapshot.state {
            info!("Timer {} -> {} on {}", before, snapshot.state, action);
        } else {
            debug!("Timer {} after {}", snapshot.state, action);
        }

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(snapshot)
    }

    pub fn select_field(&self, field: Field) -> Result<TimerSnapshot, String> {
        self.command("select", |engine| engine.select_field(field))
    }

    pub fn configure(&self, field: Field, delta: i64) -> Result<TimerSnapshot, String> {
        self.command("configure", |engine| engine.configure(field, delta))
    }

    /// Adjust the selected field by one unit up or down
    pub fn adjust(&self, delta: i64) -> Result<TimerSnapshot, String> {
        self.command(if delta >= 0 { "plus" } else { "minus" }, |engine| engine.adjust(delta))
    }

    pub fn start(&self) -> Result<TimerSnapshot, String> {
        self.command("start", CountdownEngine::start)
    }

    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        self.command("pause", CountdownEngine::pause)
    }

    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        self.command("reset", CountdownEngine::reset_to_preset)
    }

    pub fn toggle(&self) -> Result<TimerSnapshot, String> {
        self.command("toggle", CountdownEngine::toggle)
    }

    /// Deliver an animation frame (runtime use only, not a user action)
    pub fn deliver_frame(&self, handle: FrameHandle, now: Duration) -> Result<(), String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        engine.on_frame(handle, now);
        Ok(())
    }

    /// Deliver the alarm's automatic stop (runtime use only)
    pub fn deliver_alarm_timeout(&self, handle: TimeoutHandle) -> Result<(), String> {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        engine.on_alarm_timeout(handle);
        Ok(())
    }

    /// Get current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.engine.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Get the latest drawn frame
    pub fn get_view(&self) -> TimerView {
        self.view_rx.borrow().clone()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
