//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core,input,runtime,term,types}`.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_runtime as runtime;
pub use blockfall_term as term;
pub use blockfall_types as types;
