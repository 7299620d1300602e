mod config;
mod controller;
mod error;
mod guess;
mod request;
mod score;
mod state;
mod timer;

use std::collections::VecDeque;

use tokio::sync::mpsc::{Sender, Receiver, channel};
use tokio::sync::{watch, broadcast};
use tracing::{debug, error, info};

use crate::consts::*;
use crate::types::*;
use protocol::{RoomEvent, RoomSnapshot, Stage};

pub use config::{Config, WordBank};
pub use controller::GameController;
pub use error::{ConfigError, RoomError, RoomResult};
pub use request::Request as RoomReq;
pub use score::Scoring;
pub use timer::{Interval, Manual, TickHandle, TickSource};

/// Single consumer of every request. Owns the controller and the tick
/// subscription, which only exists while a round is being drawn.
pub struct Room {
    controller: GameController,

    ticks: Box<dyn TickSource>,
    ticker: Option<TickHandle>,
    generation: Generation,

    rm_rx: Receiver<RoomReq>,
    loopback: Sender<RoomReq>,
    /// Pulled off the channel while batching a tick, handled next.
    backlog: VecDeque<RoomReq>,

    snapshot_tx: watch::Sender<RoomSnapshot>,
    event_tx: broadcast::Sender<RoomEvent>,
}

impl Room {
    pub fn new(config: Config, ticks: impl TickSource + 'static) -> Result<Self, ConfigError> {
        let controller = GameController::new(config)?;
        let (loopback, rm_rx) = channel::<RoomReq>(REQ_BUFFER);
        let (snapshot_tx, _) = watch::channel(controller.snapshot());
        let (event_tx, _) = broadcast::channel(EVENT_BUFFER);

        Ok(Self {
            controller,

            ticks: Box::new(ticks),
            ticker: None,
            generation: 0,

            rm_rx,
            loopback,
            backlog: VecDeque::new(),

            snapshot_tx,
            event_tx,
        })
    }

    pub fn get_tx(&self) -> Sender<RoomReq> {
        self.loopback.clone()
    }

    pub fn subscribe_snapshot(&self) -> watch::Receiver<RoomSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<RoomEvent> {
        self.event_tx.subscribe()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Runs until `Shutdown`. An invariant violation stops the loop and is
    /// handed back to the caller.
    pub async fn run(&mut self) -> RoomResult<()> {
        info!("room open");
        loop {
            let req = match self.backlog.pop_front() {
                Some(req) => req,
                None => match self.rm_rx.recv().await {
                    Some(req) => req,
                    None => break,
                },
            };
            let batch = match req {
                RoomReq::Tick(_) => self.tick_last(req),
                req => vec![req],
            };
            for req in batch {
                match self.handle(req) {
                    Ok(true) => {},
                    Ok(false) => {
                        info!("room closed");
                        return Ok(());
                    },
                    Err(err) => {
                        error!(%err, "room state is corrupt, closing");
                        self.teardown();
                        return Err(err);
                    }
                }
            }
        }
        self.teardown();
        Ok(())
    }

    /// Guesses queued right behind a live tick belong to the same second and
    /// are judged before it. The run ends at the first request that is neither
    /// a guess nor a tick; that one and everything after keep their order.
    fn tick_last(&mut self, tick: RoomReq) -> Vec<RoomReq> {
        let live = match (&tick, &self.ticker) {
            (RoomReq::Tick(generation), Some(ticker)) => ticker.generation() == *generation,
            _ => false,
        };
        if !live {
            return vec![tick];
        }
        let mut guesses = vec![];
        let mut ticks = vec![tick];
        while let Ok(req) = self.rm_rx.try_recv() {
            match req {
                RoomReq::Guess { .. } => guesses.push(req),
                RoomReq::Tick(_) => ticks.push(req),
                req => {
                    self.backlog.push_back(req);
                    break;
                }
            }
        }
        guesses.extend(ticks);
        guesses
    }

    fn handle(&mut self, req: RoomReq) -> RoomResult<bool> {
        let events = match req {
            RoomReq::StartRound => self.controller.start_round(),
            RoomReq::Guess { player: Some(player), text } => self.controller.submit_guess_as(player, &text)?,
            RoomReq::Guess { player: None, text } => self.controller.submit_guess(&text)?,
            RoomReq::NextRound => self.controller.next_round(),
            RoomReq::ClearSurface => self.controller.clear_surface(),
            RoomReq::Tick(generation) => {
                match self.ticker {
                    Some(ref ticker) if ticker.generation() == generation => self.controller.tick(),
                    _ => {
                        debug!(generation, "stale tick dropped");
                        vec![]
                    }
                }
            },
            RoomReq::Shutdown => {
                self.teardown();
                return Ok(false);
            },
        };
        self.sync_ticker();
        self.publish(events);
        Ok(true)
    }

    /// Subscribe on entering drawing, release on any way out.
    fn sync_ticker(&mut self) {
        let drawing = self.controller.stage() == Stage::Drawing;
        if drawing && self.ticker.is_none() {
            self.generation += 1;
            self.ticker = Some(self.ticks.subscribe(self.generation, self.loopback.clone()));
            debug!(generation = self.generation, "ticker acquired");
        } else if !drawing {
            if let Some(ticker) = self.ticker.take() {
                debug!(generation = ticker.generation(), "ticker released");
                ticker.stop();
            }
        }
    }

    fn publish(&self, events: Vec<RoomEvent>) {
        if events.is_empty() {
            return;
        }
        // snapshot first, so an event reader always finds the state it caused
        self.snapshot_tx.send_replace(self.controller.snapshot());
        for event in events {
            let _ = self.event_tx.send(event);
        }
    }

    fn teardown(&mut self) {
        self.controller.teardown();
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }
}
