//! Shapes module - shape matrices and the fixed catalog of seven templates
//!
//! A [`Shape`] owns its cells, so every template handed out by [`template`]
//! is a fresh value. Rotating or moving a piece can never write back into the
//! catalog.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::types::{Cell, ShapeKind, EMPTY, MAX_COLOR_ID, MAX_SHAPE_SIDE};

/// Storage for up to 4x4 cells, row-major.
type ShapeCells = ArrayVec<Cell, { MAX_SHAPE_SIDE * MAX_SHAPE_SIDE }>;

/// Rectangular matrix of cell values describing one piece in one orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    /// Row-major cells (row * cols + col)
    cells: ShapeCells,
}

impl Shape {
    /// Build a shape from rows of cell values.
    ///
    /// Returns `None` for an empty or ragged matrix, a side longer than 4, or
    /// a value above the highest color id.
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let s = Shape::from_rows(&[[0, 6, 0], [6, 6, 6]]).unwrap();
    /// assert_eq!((s.rows(), s.cols()), (2, 3));
    /// assert!(Shape::from_rows(&[[9]]).is_none());
    /// ```
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.as_ref().len();
        if width == 0 || height > MAX_SHAPE_SIDE || width > MAX_SHAPE_SIDE {
            return None;
        }

        let mut cells = ShapeCells::new();
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            for &cell in row {
                if cell > MAX_COLOR_ID {
                    return None;
                }
                cells.push(cell);
            }
        }

        Some(Self {
            rows: height,
            cols: width,
            cells,
        })
    }

    /// Assemble a shape from already validated parts.
    pub(crate) fn from_parts(rows: usize, cols: usize, cells: ShapeCells) -> Self {
        debug_assert_eq!(rows * cols, cells.len());
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at (row, col), `None` outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    /// Iterate the occupied cells as `(row, col, value)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != EMPTY)
            .map(move |(i, &cell)| (i / cols, i % cols, cell))
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// The shape turned 90° clockwise. See [`crate::rotation::rotate`].
    pub fn rotated(&self) -> Shape {
        crate::rotation::rotate(self)
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.cols).map(|r| r.to_vec()).collect()
    }
}

const I_TEMPLATE: &[&[Cell]] = &[&[1, 1, 1, 1]];
const J_TEMPLATE: &[&[Cell]] = &[&[2, 0, 0], &[2, 2, 2]];
const L_TEMPLATE: &[&[Cell]] = &[&[0, 0, 3], &[3, 3, 3]];
const O_TEMPLATE: &[&[Cell]] = &[&[4, 4], &[4, 4]];
const S_TEMPLATE: &[&[Cell]] = &[&[0, 5, 5], &[5, 5, 0]];
const T_TEMPLATE: &[&[Cell]] = &[&[0, 6, 0], &[6, 6, 6]];
const Z_TEMPLATE: &[&[Cell]] = &[&[7, 7, 0], &[0, 7, 7]];

/// Spawn orientation of a shape kind, as a new value.
pub fn template(kind: ShapeKind) -> Shape {
    let matrix = match kind {
        ShapeKind::I => I_TEMPLATE,
        ShapeKind::J => J_TEMPLATE,
        ShapeKind::L => L_TEMPLATE,
        ShapeKind::O => O_TEMPLATE,
        ShapeKind::S => S_TEMPLATE,
        ShapeKind::T => T_TEMPLATE,
        ShapeKind::Z => Z_TEMPLATE,
    };

    let mut cells = ShapeCells::new();
    for row in matrix {
        cells.extend(row.iter().copied());
    }
    Shape::from_parts(matrix.len(), matrix[0].len(), cells)
}

/// Pick a kind uniformly at random.
pub fn random_kind<R: Rng>(rng: &mut R) -> ShapeKind {
    ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())]
}

/// Pick a template uniformly at random.
pub fn pick_random<R: Rng>(rng: &mut R) -> Shape {
    template(random_kind(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_templates_use_single_color() {
        for kind in ShapeKind::ALL {
            let shape = template(kind);
            assert_eq!(shape.cell_count(), 4, "{:?} should have 4 cells", kind);
            assert!(shape
                .occupied()
                .all(|(_, _, value)| value == kind.color_id()));
        }
    }

    #[test]
    fn test_template_dimensions() {
        assert_eq!((template(ShapeKind::I).rows(), template(ShapeKind::I).cols()), (1, 4));
        assert_eq!((template(ShapeKind::O).rows(), template(ShapeKind::O).cols()), (2, 2));
        for kind in [ShapeKind::J, ShapeKind::L, ShapeKind::S, ShapeKind::T, ShapeKind::Z] {
            let shape = template(kind);
            assert_eq!((shape.rows(), shape.cols()), (2, 3));
        }
    }

    #[test]
    fn test_occupied_positions() {
        let t = template(ShapeKind::T);
        let cells: Vec<_> = t.occupied().collect();
        assert_eq!(cells, vec![(0, 1, 6), (1, 0, 6), (1, 1, 6), (1, 2, 6)]);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        let empty: [[Cell; 0]; 0] = [];
        assert!(Shape::from_rows(&empty).is_none());
        assert!(Shape::from_rows(&[vec![1, 1], vec![1]]).is_none());
        assert!(Shape::from_rows(&[[1, 1, 1, 1, 1]]).is_none());
        assert!(Shape::from_rows(&[[0u8; 0]]).is_none());
    }

    #[test]
    fn test_pick_random_covers_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let shape = pick_random(&mut rng);
            let (_, _, id) = shape.occupied().next().unwrap();
            seen[(id - 1) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
