//! In-memory stand-ins for the engine's collaborators

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use super::{
    alarm::{Playback, PlaybackError},
    clock::Clock,
    driver::{AnimationDriver, FrameHandle, Scheduler, TimeoutHandle},
    render::{Digits, RenderSink, RingArc},
};

#[derive(Debug, Clone, Default)]
pub struct ManualClock(Arc<Mutex<Duration>>);

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.0.lock().unwrap()
    }
}

#[derive(Debug, Default)]
pub struct DriverLog {
    next_id: u64,
    pub pending: Option<FrameHandle>,
    pub requested: u64,
    pub cancelled: Vec<FrameHandle>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeDriver(Arc<Mutex<DriverLog>>);

impl FakeDriver {
    pub fn pending(&self) -> Option<FrameHandle> {
        self.0.lock().unwrap().pending
    }

    pub fn requested(&self) -> u64 {
        self.0.lock().unwrap().requested
    }

    pub fn cancelled(&self) -> Vec<FrameHandle> {
        self.0.lock().unwrap().cancelled.clone()
    }

    /// Take the pending frame as if it were about to be delivered
    pub fn take(&self) -> Option<FrameHandle> {
        self.0.lock().unwrap().pending.take()
    }
}

impl AnimationDriver for FakeDriver {
    fn request_frame(&mut self) -> FrameHandle {
        let mut log = self.0.lock().unwrap();
        assert!(log.pending.is_none(), "more than one pending frame");
        log.next_id += 1;
        log.requested += 1;
        let handle = FrameHandle::new(log.next_id);
        log.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut log = self.0.lock().unwrap();
        if log.pending == Some(handle) {
            log.pending = None;
        }
        log.cancelled.push(handle);
    }
}

#[derive(Debug, Default)]
pub struct SchedulerLog {
    next_id: u64,
    pub pending: Vec<(TimeoutHandle, Duration)>,
    pub cancelled: Vec<TimeoutHandle>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeScheduler(Arc<Mutex<SchedulerLog>>);

impl FakeScheduler {
    pub fn pending(&self) -> Vec<(TimeoutHandle, Duration)> {
        self.0.lock().unwrap().pending.clone()
    }

    pub fn cancelled(&self) -> Vec<TimeoutHandle> {
        self.0.lock().unwrap().cancelled.clone()
    }
}

impl Scheduler for FakeScheduler {
    fn schedule(&mut self, delay: Duration) -> TimeoutHandle {
        let mut log = self.0.lock().unwrap();
        log.next_id += 1;
        let handle = TimeoutHandle::new(log.next_id);
        log.pending.push((handle, delay));
        handle
    }

    fn cancel(&mut self, handle: TimeoutHandle) {
        let mut log = self.0.lock().unwrap();
        let before = log.pending.len();
        log.pending.retain(|(pending, _)| *pending != handle);
        if log.pending.len() != before {
            log.cancelled.push(handle);
        }
    }
}

#[derive(Debug, Default)]
pub struct SinkLog {
    pub rings: Vec<RingArc>,
    pub digits: Vec<Digits>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSink(Arc<Mutex<SinkLog>>);

impl RecordingSink {
    pub fn last_ring(&self) -> Option<RingArc> {
        self.0.lock().unwrap().rings.last().copied()
    }

    pub fn last_digits(&self) -> Option<String> {
        self.0.lock().unwrap().digits.last().map(|d| d.to_string())
    }

    pub fn digit_renders(&self) -> usize {
        self.0.lock().unwrap().digits.len()
    }

    pub fn ring_renders(&self) -> usize {
        self.0.lock().unwrap().rings.len()
    }
}

impl RenderSink for RecordingSink {
    fn ring(&mut self, arc: RingArc) {
        self.0.lock().unwrap().rings.push(arc);
    }

    fn digits(&mut self, digits: Digits) {
        self.0.lock().unwrap().digits.push(digits);
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackLog {
    pub playing: bool,
    pub plays: u32,
    pub pauses: u32,
    pub rewinds: u32,
    fail_next: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakePlayback(Arc<Mutex<PlaybackLog>>);

impl FakePlayback {
    pub fn log(&self) -> PlaybackLog {
        self.0.lock().unwrap().clone()
    }

    pub fn fail_next_play(&self) {
        self.0.lock().unwrap().fail_next = true;
    }
}

impl Playback for FakePlayback {
    fn rewind(&mut self) {
        self.0.lock().unwrap().rewinds += 1;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut log = self.0.lock().unwrap();
        if log.fail_next {
            log.fail_next = false;
            return Err(PlaybackError::Spawn {
                player: "fake".to_string(),
                reason: "autoplay blocked".to_string(),
            });
        }
        log.plays += 1;
        log.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut log = self.0.lock().unwrap();
        log.pauses += 1;
        log.playing = false;
    }
}
