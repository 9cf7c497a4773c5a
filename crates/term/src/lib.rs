//! Terminal rendering.
//!
//! [`GameView`] turns a [`core::GameSnapshot`] into a [`FrameBuffer`] without
//! touching the terminal, so layout can be unit-tested. [`TerminalRenderer`]
//! owns the terminal and writes frames to it.

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use palette::{color_for, hue_to_rgb};
pub use renderer::{changed_runs, encode_frame, TerminalRenderer};
