use crate::game_state::ActivePiece;
use crate::types::{Cell, Phase, EMPTY};
use crate::Board;

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: ActivePiece,
    pub phase: Phase,
    pub episode: u32,
    pub pieces_spawned: u64,
}

impl GameSnapshot {
    /// Cell value at (row, col) with the active piece drawn over the board.
    pub fn cell_at(&self, row: i32, col: i32) -> Cell {
        let piece_row = row - self.active.y;
        let piece_col = col - self.active.x;
        if piece_row >= 0 && piece_col >= 0 {
            if let Some(value) = self
                .active
                .shape
                .get(piece_row as usize, piece_col as usize)
            {
                if value != EMPTY {
                    return value;
                }
            }
        }
        self.board.get(row, col).unwrap_or(EMPTY)
    }

    /// Board coordinates `(row, col, value)` covered by the active piece.
    pub fn active_cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.active.cells()
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling
    }
}
