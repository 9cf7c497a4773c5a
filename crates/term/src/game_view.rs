//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! No terminal I/O happens here; the output is a plain framebuffer.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::palette::color_for;
use crate::types::{Cell, Phase, EMPTY};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const FILLED: char = '█';
const BORDER: Style = Style::new(Rgb::new(200, 200, 200), Rgb::BLACK);
const BANNER: Style = Style::new(Rgb::WHITE, Rgb::BLACK).bold();

/// Draws the board, the falling piece and the game-over banner.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Terminal glyphs are roughly twice as tall as wide.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Size of the bordered board in terminal cells.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        let w = snap.board.cols() as u16 * self.cell_w + 2;
        let h = snap.board.rows() as u16 * self.cell_h + 2;
        (w, h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let (frame_w, frame_h) = self.frame_size(snap);
        let left = viewport.width.saturating_sub(frame_w) / 2;
        let top = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, left, top, frame_w, frame_h);

        // Settled cells with the active piece drawn on top.
        for row in 0..snap.board.rows() {
            for col in 0..snap.board.cols() {
                let value = snap.cell_at(row as i32, col as i32);
                self.draw_cell(fb, left, top, col as u16, row as u16, value);
            }
        }

        if snap.phase == Phase::GameOver {
            let text = "GAME OVER";
            let text_w = text.chars().count() as u16;
            let x = left.saturating_add(frame_w.saturating_sub(text_w) / 2);
            let y = top.saturating_add(frame_h / 2);
            fb.put_str(x, y, text, BANNER);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let put = |fb: &mut FrameBuffer, px: u16, py: u16, ch: char| {
            fb.set(px, py, Glyph { ch, style: BORDER });
        };

        put(fb, x, y, '┌');
        put(fb, x + w - 1, y, '┐');
        put(fb, x, y + h - 1, '└');
        put(fb, x + w - 1, y + h - 1, '┘');
        for dx in 1..w - 1 {
            put(fb, x + dx, y, '─');
            put(fb, x + dx, y + h - 1, '─');
        }
        for dy in 1..h - 1 {
            put(fb, x, y + dy, '│');
            put(fb, x + w - 1, y + dy, '│');
        }
    }

    fn draw_cell(&self, fb: &mut FrameBuffer, left: u16, top: u16, col: u16, row: u16, value: Cell) {
        let color = color_for(value);
        let glyph = if value == EMPTY {
            Glyph {
                ch: ' ',
                style: Style::new(Rgb::BLACK, color),
            }
        } else {
            Glyph {
                ch: FILLED,
                style: Style::new(color, Rgb::BLACK),
            }
        };
        let px = left + 1 + col * self.cell_w;
        let py = top + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, glyph);
    }
}
