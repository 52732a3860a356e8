//! Animation frame driver background task

use std::{sync::Arc, time::Duration};
use tokio::{sync::watch, time::sleep};
use tracing::{debug, error, info};

use crate::{
    engine::{AnimationDriver, Clock, FrameHandle},
    state::AppState,
};

/// Default frame interval, roughly 60 Hz
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Frame driver handing the engine one pending frame at a time
#[derive(Debug)]
pub struct TokioFrameDriver {
    pending_tx: watch::Sender<Option<FrameHandle>>,
    next_id: u64,
}

impl TokioFrameDriver {
    /// Create a driver and the receiver the frame task listens on
    pub fn new() -> (Self, watch::Receiver<Option<FrameHandle>>) {
        let (pending_tx, pending_rx) = watch::channel(None);
        (Self { pending_tx, next_id: 0 }, pending_rx)
    }
}

impl AnimationDriver for TokioFrameDriver {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.pending_tx.send_replace(Some(handle));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending_tx.send_if_modified(|pending| {
            if *pending == Some(handle) {
                *pending = None;
                true
            } else {
                false
            }
        });
    }
}

/// Background task delivering requested frames to the engine
pub async fn frame_driver_task(
    state: Arc<AppState>,
    mut pending_rx: watch::Receiver<Option<FrameHandle>>,
    clock: Arc<dyn Clock>,
    frame_interval: Duration,
) {
    info!("Starting frame driver task ({}ms frames)", frame_interval.as_millis());

    let mut last_delivered: Option<FrameHandle> = None;

    loop {
        // Wait for a frame we have not delivered yet
        let requested = pending_rx
            .wait_for(|pending| pending.is_some() && *pending != last_delivered)
            .await
            .is_ok();
        if !requested {
            debug!("Frame driver closed, stopping frame task");
            break;
        }

        sleep(frame_interval).await;

        // A pause during the sleep clears the pending frame
        let Some(handle) = *pending_rx.borrow_and_update() else {
            continue;
        };
        if Some(handle) == last_delivered {
            continue;
        }
        last_delivered = Some(handle);

        if let Err(e) = state.deliver_frame(handle, clock.now()) {
            error!("Failed to deliver frame: {}", e);
        }
    }
}
