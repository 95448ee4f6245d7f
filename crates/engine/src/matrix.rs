//! Electrode matrix - one boolean per addressable electrode
//!
//! The matrix spans the whole physical grid, special columns included.
//! Game code addresses it in playable coordinates through the `*_play`
//! helpers, which shift x by one and refuse anything outside the playable
//! area so nothing ever lands on a special column by accident.

use crate::core::BitGrid;
use crate::types::{Position, MATRIX_HEIGHT, MATRIX_WIDTH, PLAY_HEIGHT, PLAY_WIDTH};

type Cells = BitGrid<{ MATRIX_WIDTH as usize }, { MATRIX_HEIGHT as usize }>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ElectrodeMatrix {
    cells: Cells,
}

impl ElectrodeMatrix {
    pub fn new() -> Self {
        Self {
            cells: Cells::new(),
        }
    }

    /// Electrode at matrix coordinates; `None` if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<bool> {
        self.cells.get(x, y)
    }

    /// Set electrode at matrix coordinates
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, active: bool) -> bool {
        self.cells.set(x, y, active)
    }

    fn in_play(pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < PLAY_WIDTH as i8 && pos.y < PLAY_HEIGHT as i8
    }

    /// Electrode under a playable cell
    pub fn is_active_play(&self, pos: Position) -> bool {
        Self::in_play(pos) && self.cells.is_set(pos.x + 1, pos.y)
    }

    /// Set the electrode under a playable cell
    /// Returns false if `pos` is outside the playable grid
    pub fn set_play(&mut self, pos: Position, active: bool) -> bool {
        if !Self::in_play(pos) {
            return false;
        }
        self.cells.set(pos.x + 1, pos.y, active)
    }

    /// Column packed as a byte, bit `y` set when row `y` is active
    pub fn column_byte(&self, x: usize) -> u8 {
        if x >= MATRIX_WIDTH as usize {
            return 0;
        }
        self.cells
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row[x])
            .fold(0u8, |acc, (y, _)| acc | (1 << y))
    }

    /// Active playable cells, row-major
    pub fn active_play_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter_set()
            .filter(|p| p.x >= 1 && p.x <= PLAY_WIDTH as i8)
            .map(|p| p.offset(-1, 0))
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
