//! Collision detection between a positioned shape and the board.

use crate::board::Board;
use crate::shapes::Shape;

/// True if `shape` anchored at column `x`, row `y` hits a wall, the floor,
/// the ceiling or a settled cell.
///
/// Only occupied shape cells count; empty cells inside the bounding box may
/// hang off the board freely. Stops at the first offending cell.
pub fn is_collision(board: &Board, shape: &Shape, x: i32, y: i32) -> bool {
    shape
        .occupied()
        .any(|(row, col, _)| !board.is_vacant(y + row as i32, x + col as i32))
}
