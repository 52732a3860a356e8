//! Wiring of the engine to tokio-backed collaborators

use std::{sync::Arc, time::Duration};
use tracing::info;

use super::{alarm_timeout_task, frame_driver_task, TokioFrameDriver, TokioScheduler, FRAME_INTERVAL};
use crate::{
    engine::{AlarmController, Clock, CountdownEngine, MonotonicClock, Playback, ALARM_CEILING},
    state::{AppState, WatchSink},
};

/// Timing knobs for the runtime
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    pub frame_interval: Duration,
    pub alarm_ceiling: Duration,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            frame_interval: FRAME_INTERVAL,
            alarm_ceiling: ALARM_CEILING,
        }
    }
}

/// Build the engine with tokio collaborators and spawn its background tasks.
///
/// Must be called from within a tokio runtime.
pub fn start_timer_runtime(
    port: u16,
    host: String,
    options: RuntimeOptions,
    playback: Box<dyn Playback>,
) -> Arc<AppState> {
    let clock: Arc<dyn Clock> = Arc::new(MonotonicClock::new());
    let (driver, pending_rx) = TokioFrameDriver::new();
    let (scheduler, fired_rx) = TokioScheduler::new();
    let (sink, view_rx) = WatchSink::new();

    let alarm = AlarmController::new(playback, Box::new(scheduler)).with_ceiling(options.alarm_ceiling);
    let engine = CountdownEngine::new(Arc::clone(&clock), Box::new(driver), Box::new(sink), alarm);
    let state = Arc::new(AppState::new(port, host, engine, view_rx));

    let frame_state = Arc::clone(&state);
    tokio::spawn(async move {
        frame_driver_task(frame_state, pending_rx, clock, options.frame_interval).await;
    });

    let timeout_state = Arc::clone(&state);
    tokio::spawn(async move {
        alarm_timeout_task(timeout_state, fired_rx).await;
    });

    info!(
        "Timer runtime started: frame={}ms, alarm ceiling={}s",
        options.frame_interval.as_millis(),
        options.alarm_ceiling.as_secs()
    );
    state
}
