//! Board module - the grid of settled cells
//!
//! The board is a `rows` x `cols` grid fixed at construction, stored as a flat
//! row-major vector. Coordinates are `(row, col)` with row 0 at the top.
//! Signed coordinates are accepted everywhere so that piece cells hanging off
//! an edge can be tested without casts at the call site.

use crate::shapes::Shape;
use crate::types::{Cell, EMPTY, MAX_COLOR_ID};

/// The settled-cell grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an all-empty board.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![EMPTY; rows * cols],
        }
    }

    /// Build a board from rows listed top to bottom.
    ///
    /// Returns `None` if there are no rows, the rows differ in length or are
    /// empty, or a value is above the highest color id.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Option<Self> {
        let cols = rows.first()?.as_ref().len();
        if cols == 0 {
            return None;
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols || row.iter().any(|&c| c > MAX_COLOR_ID) {
                return None;
            }
            cells.extend_from_slice(row);
        }

        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at (row, col). Returns None if out of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    pub fn is_vacant(&self, row: i32, col: i32) -> bool {
        self.get(row, col) == Some(EMPTY)
    }

    /// In bounds and filled.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(c) if c != EMPTY)
    }

    /// One row as a slice, top row is 0.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Rows from top to bottom.
    pub fn iter_rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.cols.max(1))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| !cells.is_empty() && cells.iter().all(|&c| c != EMPTY))
            .unwrap_or(false)
    }

    /// Remove one row, shift everything above it down and put an empty row on top.
    fn remove_row(&mut self, row: usize) {
        let width = self.cols;
        self.cells.copy_within(0..row * width, width);
        self.cells[..width].fill(EMPTY);
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Scans bottom to top. When a row is removed the rows above slide down one
    /// step, so the same index is checked again before moving up. Rows that stay
    /// keep their relative order and the row count never changes.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = self.rows;

        while row > 0 {
            if self.is_row_full(row - 1) {
                self.remove_row(row - 1);
                cleared += 1;
            } else {
                row -= 1;
            }
        }

        cleared
    }

    /// Write the occupied cells of `shape` anchored at column `x`, row `y`.
    ///
    /// Callers merge only after a failed move-down check at the current
    /// position, so every cell lands in bounds. Cells that fall outside anyway
    /// are dropped. Returns the number of cells written.
    pub fn merge(&mut self, shape: &Shape, x: i32, y: i32) -> usize {
        let mut written = 0;
        for (r, c, value) in shape.occupied() {
            if self.set(y + r as i32, x + c as i32, value) {
                written += 1;
            }
        }
        written
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Flat row-major view of all cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }
}
