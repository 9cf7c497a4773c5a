//! Game configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BLOCKFALL_ROWS` | 20 |
//! | `BLOCKFALL_COLS` | 10 |
//! | `BLOCKFALL_SEED` | random |
//! | `BLOCKFALL_ROTATION` | `soft` |
//! | `BLOCKFALL_SPAWN` | `game-over` |
//! | `BLOCKFALL_LOG_PATH` | unset (no logging) |
//!
//! Empty values count as unset.

use quick_error::quick_error;

use crate::core::{Board, GameRules, GameState, RandomSource};
use crate::types::{RotationPolicy, SpawnPolicy, DEFAULT_COLS, DEFAULT_ROWS};

pub const ROWS_VAR: &str = "BLOCKFALL_ROWS";
pub const COLS_VAR: &str = "BLOCKFALL_COLS";
pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const ROTATION_VAR: &str = "BLOCKFALL_ROTATION";
pub const SPAWN_VAR: &str = "BLOCKFALL_SPAWN";
pub const LOG_PATH_VAR: &str = "BLOCKFALL_LOG_PATH";

/// Smallest board side; every shape fits in 4x4.
pub const MIN_SIDE: usize = 4;
pub const MAX_SIDE: usize = 255;

quick_error! {
    #[derive(Debug, PartialEq, Eq)]
    pub enum ConfigError {
        InvalidNumber(var: &'static str, value: String) {
            display("{var}: {value:?} is not a valid number")
        }
        OutOfRange(var: &'static str, value: usize) {
            display("{var}: {value} is outside {MIN_SIDE}..={MAX_SIDE}")
        }
        UnknownPolicy(var: &'static str, value: String) {
            display("{var}: unknown policy {value:?}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    pub rules: GameRules,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS as usize,
            cols: DEFAULT_COLS as usize,
            seed: None,
            rules: GameRules::default(),
            log_path: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup. `from_env` passes the process
    /// environment.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let defaults = Self::default();

        let rows = match get(ROWS_VAR) {
            Some(v) => parse_side(ROWS_VAR, &v)?,
            None => defaults.rows,
        };
        let cols = match get(COLS_VAR) {
            Some(v) => parse_side(COLS_VAR, &v)?,
            None => defaults.cols,
        };

        let seed = get(SEED_VAR)
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber(SEED_VAR, v))
            })
            .transpose()?;

        let rotation = match get(ROTATION_VAR) {
            Some(v) => RotationPolicy::from_str(&v)
                .ok_or(ConfigError::UnknownPolicy(ROTATION_VAR, v))?,
            None => defaults.rules.rotation,
        };
        let spawn = match get(SPAWN_VAR) {
            Some(v) => {
                SpawnPolicy::from_str(&v).ok_or(ConfigError::UnknownPolicy(SPAWN_VAR, v))?
            }
            None => defaults.rules.spawn,
        };

        Ok(Self {
            rows,
            cols,
            seed,
            rules: GameRules { rotation, spawn },
            log_path: get(LOG_PATH_VAR),
        })
    }

    /// Fresh game on an empty board of the configured size.
    pub fn build_state(&self) -> GameState<RandomSource> {
        let source = match self.seed {
            Some(seed) => RandomSource::new(seed),
            None => RandomSource::from_entropy(),
        };
        GameState::new(Board::new(self.rows, self.cols), source, self.rules)
    }
}

fn parse_side(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    let n: usize = value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber(var, value.to_string()))?;
    if !(MIN_SIDE..=MAX_SIDE).contains(&n) {
        return Err(ConfigError::OutOfRange(var, n));
    }
    Ok(n)
}
