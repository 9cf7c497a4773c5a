//! Cell value to color mapping.
//!
//! Filled cells use hue `value * 35°` at full saturation and 50% lightness, so
//! the color depends on the cell value alone. Empty cells are white.

use crate::fb::Rgb;
use crate::types::{Cell, EMPTY};

/// Hue step between consecutive color ids, in degrees.
pub const HUE_STEP: f32 = 35.0;

pub fn color_for(value: Cell) -> Rgb {
    if value == EMPTY {
        return Rgb::WHITE;
    }
    hue_to_rgb(value as f32 * HUE_STEP)
}

/// HSL(hue, 100%, 50%) to RGB.
pub fn hue_to_rgb(hue: f32) -> Rgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - ((h % 2.0) - 1.0).abs();

    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };

    let scale = |c: f32| (c * 255.0).round() as u8;
    Rgb::new(scale(r), scale(g), scale(b))
}
