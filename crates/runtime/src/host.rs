//! Sync wrapper that owns a tokio runtime and one game actor.
//!
//! Lets the blocking terminal loop drive the async actor.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::actor::{spawn_game, GameHandle};
use crate::config::GameConfig;
use crate::core::{GameSnapshot, GameState, RandomSource};
use crate::types::Command;

pub struct GameRuntime {
    rt: Runtime,
    handle: GameHandle,
    task: JoinHandle<GameState<RandomSource>>,
}

impl GameRuntime {
    /// Build the runtime and start a game described by `config`.
    pub fn start(config: &GameConfig) -> Result<Self> {
        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let state = config.build_state();
        let (handle, task) = {
            let _guard = rt.enter();
            spawn_game(state)
        };
        Ok(Self { rt, handle, task })
    }

    pub fn handle(&self) -> &GameHandle {
        &self.handle
    }

    /// Queue a command without blocking.
    pub fn send(&self, command: Command) -> Result<()> {
        self.handle.try_send(command)
    }

    pub fn latest(&self) -> GameSnapshot {
        self.handle.latest()
    }

    /// Stop the actor and return the final state.
    pub fn shutdown(self) -> Result<GameState<RandomSource>> {
        let Self { rt, handle, task } = self;
        rt.block_on(async move {
            handle.shutdown().await?;
            task.await.context("game actor panicked")
        })
    }
}
