//! Async game loop for blockfall.
//!
//! A single tokio task owns the game state. Keyboard commands and the
//! 500 ms gravity tick are queued on one channel and applied in order, and
//! every change is published as a [`GameSnapshot`](core::GameSnapshot) on a
//! watch channel.

pub mod actor;
pub mod config;
pub mod host;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use actor::{spawn_game, spawn_game_with_gravity, GameActor, GameEvent, GameHandle};
pub use config::{ConfigError, GameConfig};
pub use host::GameRuntime;
