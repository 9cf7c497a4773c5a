//! Terminal input mapping.
//!
//! Maps `crossterm` key events one-to-one onto [`crate::types::Command`]s.
//! There is no auto-repeat logic here; whatever repeat the terminal delivers is
//! passed through as repeated commands.

pub mod map;

pub use blockfall_types as types;

pub use map::{command_for_key, should_quit};
