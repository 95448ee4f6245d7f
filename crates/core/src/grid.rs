//! Grid module - fixed-size boolean cell storage
//!
//! Coordinates are (x, y) with x growing to the right and y growing downward.
//! Every access is bounds-checked: reads outside the grid return `None` and
//! writes outside the grid are refused, so there is never any wraparound.

use crate::types::{Position, PLAY_HEIGHT, PLAY_WIDTH};

/// Boolean grid of `W` columns by `H` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitGrid<const W: usize, const H: usize> {
    /// Row-major cells, `cells[y][x]`
    cells: [[bool; W]; H],
}

/// Grid sized to the playable area (used for static blocks)
pub type PlayGrid = BitGrid<{ PLAY_WIDTH as usize }, { PLAY_HEIGHT as usize }>;

impl<const W: usize, const H: usize> BitGrid<W, H> {
    /// Create a new grid with every cell cleared
    pub fn new() -> Self {
        Self {
            cells: [[false; W]; H],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x as usize >= W || y as usize >= H {
            return None;
        }
        Some((x as usize, y as usize))
    }

    /// Check whether (x, y) lies inside the grid
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some()
    }

    /// Get cell at (x, y); `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<bool> {
        Self::index(x, y).map(|(x, y)| self.cells[y][x])
    }

    /// Set cell at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, value: bool) -> bool {
        match Self::index(x, y) {
            Some((x, y)) => {
                self.cells[y][x] = value;
                true
            }
            None => false,
        }
    }

    /// Occupied and in bounds
    pub fn is_set(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(true))
    }

    pub fn set_at(&mut self, pos: Position, value: bool) -> bool {
        self.set(pos.x, pos.y, value)
    }

    /// Whether any cell of row `y` is set; out-of-range rows are empty
    pub fn row_any(&self, y: i8) -> bool {
        match Self::index(0, y) {
            Some((_, y)) => self.cells[y].iter().any(|&c| c),
            _ => false,
        }
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells = [[false; W]; H];
    }

    /// Number of set cells
    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    /// Positions of every set cell, row-major
    pub fn iter_set(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, c)| **c)
                .map(move |(x, _)| Position::new(x as i8, y as i8))
        })
    }

    /// Raw rows, `rows()[y][x]`
    pub fn rows(&self) -> &[[bool; W]; H] {
        &self.cells
    }
}

impl<const W: usize, const H: usize> Default for BitGrid<W, H> {
    fn default() -> Self {
        Self::new()
    }
}
