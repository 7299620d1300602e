use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::consts::TICK_PERIOD;
use crate::types::Generation;
use super::request::Request as RoomReq;

/// Countdown arithmetic only; somebody else calls `tick` once per second.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    duration: u32,
    remaining: u32,
    running: bool,
}

impl RoundTimer {
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            remaining: duration,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.remaining = self.duration;
        self.running = true;
    }

    /// True only on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return true;
        }
        false
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Where the room gets its 1 Hz ticks from while a round is being drawn.
pub trait TickSource: Send {
    fn subscribe(&self, generation: Generation, loopback: mpsc::Sender<RoomReq>) -> TickHandle;
}

/// Wall-clock ticks from a spawned task.
pub struct Interval;

impl TickSource for Interval {
    fn subscribe(&self, generation: Generation, loopback: mpsc::Sender<RoomReq>) -> TickHandle {
        let (tx, mut rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut rx => return,
                    _ = sleep(TICK_PERIOD) => {
                        if loopback.send(RoomReq::Tick(generation)).await.is_err() {
                            return;
                        }
                    }
                }
            }
        });
        TickHandle {
            generation,
            stopper: Some(tx),
            task: Some(task),
        }
    }
}

/// Ticks are sent by hand; used by tests.
pub struct Manual;

impl TickSource for Manual {
    fn subscribe(&self, generation: Generation, _loopback: mpsc::Sender<RoomReq>) -> TickHandle {
        TickHandle {
            generation,
            stopper: None,
            task: None,
        }
    }
}

/// A live subscription. Stopping or dropping it cancels the ticks.
#[derive(Debug)]
pub struct TickHandle {
    generation: Generation,
    stopper: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(stopper) = self.stopper.take() {
            let _ = stopper.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.release();
    }
}
