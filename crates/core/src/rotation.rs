//! Rotation transform.

use crate::shapes::Shape;

/// Rotate a shape 90° clockwise.
///
/// An R×C input becomes a C×R output where `out[col][R - 1 - row] = in[row][col]`.
/// The input is left untouched. No bounds adjustment or wall kick happens here;
/// callers validate the result against the board.
///
/// ```
/// use blockfall_core::{rotate, Shape};
///
/// let j = Shape::from_rows(&[[2, 0, 0], [2, 2, 2]]).unwrap();
/// let r = rotate(&j);
/// assert_eq!(r.to_rows(), vec![vec![2, 2], vec![2, 0], vec![2, 0]]);
/// ```
pub fn rotate(shape: &Shape) -> Shape {
    let rows = shape.rows();
    let cols = shape.cols();

    let mut cells = arrayvec::ArrayVec::new();
    for out_row in 0..cols {
        for out_col in 0..rows {
            // out[out_row][out_col] = in[rows - 1 - out_col][out_row]
            cells.push(shape.get(rows - 1 - out_col, out_row).unwrap_or_default());
        }
    }

    Shape::from_parts(cols, rows, cells)
}
