//! Alarm auto-stop scheduling background task

use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::{sync::mpsc, task::JoinHandle, time::sleep};
use tracing::{debug, error, info};

use crate::{
    engine::{Scheduler, TimeoutHandle},
    state::AppState,
};

/// Scheduler backed by one sleeping tokio task per timeout
#[derive(Debug)]
pub struct TokioScheduler {
    fired_tx: mpsc::UnboundedSender<TimeoutHandle>,
    pending: HashMap<TimeoutHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver fired timeouts arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimeoutHandle>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            fired_tx,
            pending: HashMap::new(),
            next_id: 0,
        };
        (scheduler, fired_rx)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimeoutHandle {
        self.next_id += 1;
        let handle = TimeoutHandle::new(self.next_id);
        let fired_tx = self.fired_tx.clone();

        let task = tokio::spawn(async move {
            sleep(delay).await;
            if fired_tx.send(handle).is_err() {
                debug!("Timeout {} fired after receiver closed", handle.id());
            }
        });
        self.pending.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimeoutHandle) {
        if let Some(task) = self.pending.remove(&handle) {
            task.abort();
        }
    }
}

/// Background task delivering fired alarm timeouts to the engine
pub async fn alarm_timeout_task(state: Arc<AppState>, mut fired_rx: mpsc::UnboundedReceiver<TimeoutHandle>) {
    info!("Starting alarm timeout task");

    while let Some(handle) = fired_rx.recv().await {
        debug!("Alarm timeout {} fired", handle.id());
        if let Err(e) = state.deliver_alarm_timeout(handle) {
            error!("Failed to deliver alarm timeout: {}", e);
        }
    }

    debug!("Alarm scheduler closed, stopping timeout task");
}
