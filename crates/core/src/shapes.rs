//! Shapes module - the seven piece shapes and their rotation
//!
//! Each piece is a square boolean matrix sized to the smallest bounding box
//! for its kind (2x2 for O, 4x4 for I, 3x3 for the rest). Rotation is a plain
//! matrix transform with no wall kicks:
//!
//! - clockwise: `new[y][x] = old[N-1-x][y]`
//! - counter-clockwise: `new[y][x] = old[x][N-1-y]`

use crate::types::{PieceKind, Position, Spin};

/// Largest bounding box of any piece
pub const MAX_SHAPE_SIZE: usize = 4;

/// Square boolean shape, `size` x `size` cells used out of a 4x4 buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from row strings, `#` for filled and `.` for empty.
    ///
    /// Panics if the rows are not square or larger than [`MAX_SHAPE_SIZE`];
    /// only used for the fixed catalog and tests.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(size > 0 && size <= MAX_SHAPE_SIZE, "shape size out of range");
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            let bytes = row.as_bytes();
            assert_eq!(bytes.len(), size, "shape rows must be square");
            for (x, b) in bytes.iter().enumerate() {
                cells[y][x] = *b == b'#';
            }
        }
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Side length N of the bounding box
    pub fn size(&self) -> usize {
        self.size as usize
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.cells[y][x]
    }

    /// Offsets of the filled cells, row-major
    pub fn offsets(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Filled cells placed with their top-left corner at `anchor`
    pub fn cells_at(&self, anchor: Position) -> impl Iterator<Item = Position> + '_ {
        self.offsets().map(move |(dx, dy)| anchor.offset(dx, dy))
    }

    /// Center cell of the bounding box placed at `anchor`.
    ///
    /// Not clamped: for a box overhanging the grid edge this can fall outside
    /// the playable area even though every filled cell is inside it.
    pub fn center_at(&self, anchor: Position) -> Position {
        let half = (self.size() / 2) as i8;
        anchor.offset(half, half)
    }

    pub fn filled_count(&self) -> usize {
        self.offsets().count()
    }
}

/// Spawn shape for a piece kind
pub fn shape_of(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&["....", "####", "....", "...."]),
        PieceKind::O => Shape::from_rows(&["##", "##"]),
        PieceKind::T => Shape::from_rows(&[".#.", "###", "..."]),
        PieceKind::S => Shape::from_rows(&[".##", "##.", "..."]),
        PieceKind::Z => Shape::from_rows(&["##.", ".##", "..."]),
        PieceKind::J => Shape::from_rows(&["#..", "###", "..."]),
        PieceKind::L => Shape::from_rows(&["..#", "###", "..."]),
    }
}

/// Rotate a shape a quarter turn
pub fn rotate(shape: &Shape, spin: Spin) -> Shape {
    let n = shape.size();
    let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    for (y, row) in cells.iter_mut().enumerate().take(n) {
        for (x, cell) in row.iter_mut().enumerate().take(n) {
            *cell = match spin {
                Spin::Clockwise => shape.cells[n - 1 - x][y],
                Spin::CounterClockwise => shape.cells[x][n - 1 - y],
            };
        }
    }
    Shape {
        size: shape.size,
        cells,
    }
}
