//! Game actor: one task owns the `GameState`.
//!
//! Input commands and gravity ticks arrive on the same queue, so they are
//! applied strictly one at a time in arrival order. After every change the
//! actor publishes a fresh snapshot on a watch channel for the renderer.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::{DropOutcome, GameSnapshot, GameState, ShapeSource};
use crate::types::{Command, GRAVITY_MS};

/// Pending events before senders start waiting.
pub const EVENT_QUEUE: usize = 64;

/// Everything the actor reacts to.
#[derive(Debug)]
pub enum GameEvent {
    Command(Command),
    Gravity,
    Snapshot(oneshot::Sender<GameSnapshot>),
    Shutdown,
}

/// Cloneable handle to a running game actor.
#[derive(Debug, Clone)]
pub struct GameHandle {
    events: mpsc::Sender<GameEvent>,
    snapshots: watch::Receiver<GameSnapshot>,
}

impl GameHandle {
    pub async fn send(&self, command: Command) -> Result<()> {
        self.events
            .send(GameEvent::Command(command))
            .await
            .map_err(|_| anyhow!("game actor stopped"))
    }

    /// Non-blocking send for sync callers. Fails if the queue is full.
    pub fn try_send(&self, command: Command) -> Result<()> {
        self.events
            .try_send(GameEvent::Command(command))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => anyhow!("event queue full"),
                mpsc::error::TrySendError::Closed(_) => anyhow!("game actor stopped"),
            })
    }

    /// Snapshot taken by the actor after all earlier events were applied.
    pub async fn snapshot(&self) -> Result<GameSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.events
            .send(GameEvent::Snapshot(tx))
            .await
            .map_err(|_| anyhow!("game actor stopped"))?;
        rx.await.map_err(|_| anyhow!("game actor dropped snapshot request"))
    }

    /// Most recently published snapshot.
    pub fn latest(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.events
            .send(GameEvent::Shutdown)
            .await
            .map_err(|_| anyhow!("game actor stopped"))
    }
}

pub struct GameActor<S> {
    state: GameState<S>,
    events: mpsc::Receiver<GameEvent>,
    published: watch::Sender<GameSnapshot>,
}

impl<S: ShapeSource> GameActor<S> {
    /// Process events until shutdown or until every handle is gone.
    /// Returns the final state.
    pub async fn run(mut self) -> GameState<S> {
        info!(
            rows = self.state.board().rows(),
            cols = self.state.board().cols(),
            "game actor started"
        );

        while let Some(event) = self.events.recv().await {
            match event {
                GameEvent::Command(command) => {
                    if self.state.apply(command) {
                        self.publish();
                    } else {
                        debug!(command = command.as_str(), "command had no effect");
                    }
                }
                GameEvent::Gravity => match self.state.move_down() {
                    DropOutcome::Halted => {}
                    DropOutcome::Moved => self.publish(),
                    DropOutcome::Landed { lines_cleared } => {
                        if lines_cleared > 0 {
                            info!(lines_cleared, "lines cleared");
                        }
                        self.publish();
                    }
                },
                GameEvent::Snapshot(reply) => {
                    if reply.send(self.state.snapshot()).is_err() {
                        warn!("snapshot requester went away");
                    }
                }
                GameEvent::Shutdown => break,
            }
        }

        info!(
            episode = self.state.episode(),
            pieces = self.state.pieces_spawned(),
            "game actor stopped"
        );
        self.state
    }

    fn publish(&self) {
        self.published.send_replace(self.state.snapshot());
    }
}

/// Spawn the actor and its gravity ticker on the current tokio runtime.
pub fn spawn_game<S>(state: GameState<S>) -> (GameHandle, JoinHandle<GameState<S>>)
where
    S: ShapeSource + Send + 'static,
{
    spawn_game_with_gravity(state, Duration::from_millis(GRAVITY_MS))
}

pub fn spawn_game_with_gravity<S>(
    state: GameState<S>,
    period: Duration,
) -> (GameHandle, JoinHandle<GameState<S>>)
where
    S: ShapeSource + Send + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE);
    let (snap_tx, snap_rx) = watch::channel(state.snapshot());

    let actor = GameActor {
        state,
        events: event_rx,
        published: snap_tx,
    };
    let task = tokio::spawn(actor.run());
    tokio::spawn(run_gravity(event_tx.clone(), period));

    let handle = GameHandle {
        events: event_tx,
        snapshots: snap_rx,
    };
    (handle, task)
}

/// Sends `Gravity` every `period` until the actor stops listening.
async fn run_gravity(events: mpsc::Sender<GameEvent>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if events.send(GameEvent::Gravity).await.is_err() {
            debug!("gravity ticker stopped");
            return;
        }
    }
}
