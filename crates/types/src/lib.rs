//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data: no I/O, no timing, no hardware access, so the
//! same definitions serve the game logic, the board engine and the preview.
//!
//! # Grid Dimensions
//!
//! The electrode matrix is 16 columns by 8 rows. Columns 0 and 15 are the
//! special reservoir columns; the 14 columns between them form the playable
//! grid. A column fits in one byte of the wire frame (bit `y` = row `y`).
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MATRIX_WIDTH` | 16 | Electrode columns, special columns included |
//! | `MATRIX_HEIGHT` | 8 | Electrode rows |
//! | `PLAY_WIDTH` | 14 | Playable columns |
//! | `PLAY_HEIGHT` | 8 | Playable rows |
//! | `FRAME_LEN` | 32 | Wire frame size in bytes |
//!
//! # Timing Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 200 | Movement interval between logic ticks |
//! | `DEFAULT_CLEANUP_MS` | 500 | Settle time before and after a dispense |
//!
//! # Examples
//!
//! ```
//! use droplet_tetris_types::{PieceKind, Position, Reservoir, RotationState};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Reservoir::BottomLeft.target(), Position::new(0, 7));
//! assert_eq!(RotationState::Starting.next(), RotationState::Coalesce);
//! ```

use serde::{Deserialize, Serialize};

/// Electrode matrix width, special columns included
pub const MATRIX_WIDTH: u8 = 16;

/// Electrode matrix height
pub const MATRIX_HEIGHT: u8 = 8;

/// Playable grid width (matrix minus the two special columns)
pub const PLAY_WIDTH: u8 = MATRIX_WIDTH - 2;

/// Playable grid height
pub const PLAY_HEIGHT: u8 = MATRIX_HEIGHT;

/// Wire frame length in bytes
pub const FRAME_LEN: usize = 32;

/// Default movement interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 200;

/// Default post-dispense cleanup interval in milliseconds
pub const DEFAULT_CLEANUP_MS: u64 = 500;

/// Default transport baud rate
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Tick intervals the UI offers; values outside are accepted with a warning.
pub const RECOGNIZED_TICK_MS: std::ops::RangeInclusive<u64> = 50..=1000;

/// Baud rates the UI offers; any positive rate is accepted.
pub const RECOGNIZED_BAUD_RATES: [u32; 3] = [9_600, 115_200, 921_600];

/// Anchor where new pieces appear (playable coordinates)
pub const SPAWN_POSITION: Position = Position::new(5, 0);

/// Row that ends the game once a landed block occupies it
pub const TOP_LEVEL_ROW: i8 = 0;

/// Dispense waveform, one nibble per step, MSB-first as wired on top reservoirs
pub const DISPENSE_WAVEFORM: [u8; 7] = [
    0b1000, 0b1100, 0b0111, 0b0001, 0b1100, 0b1010, 0b1010,
];

/// Waveform step on which the droplet appears on the main grid
pub const DROP_FRAME_STEP: usize = 3;

/// Nibble a reservoir rests at between dispenses
pub const DEFAULT_NIBBLE: u8 = 0b1000;

/// Mask applied to every nibble before it is stored
pub const NIBBLE_MASK: u8 = 0x0F;

/// Reverse the bit order of a 4-bit value (bit 0 <-> bit 3, bit 1 <-> bit 2).
///
/// Bottom reservoirs are wired mirrored, so every nibble written to them goes
/// through this first.
///
/// ```
/// use droplet_tetris_types::reverse_nibble;
///
/// assert_eq!(reverse_nibble(0b1010), 0b0101);
/// assert_eq!(reverse_nibble(0b1000), 0b0001);
/// ```
pub const fn reverse_nibble(n: u8) -> u8 {
    let n = n & NIBBLE_MASK;
    ((n & 0b0001) << 3) | ((n & 0b0010) << 1) | ((n & 0b0100) >> 1) | ((n & 0b1000) >> 3)
}

/// Integer cell coordinate. Playable-grid coordinates unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to `other`
    pub fn manhattan(self, other: Position) -> u32 {
        (self.x as i32 - other.x as i32).unsigned_abs()
            + (self.y as i32 - other.y as i32).unsigned_abs()
    }

    /// Squared straight-line distance to `other`.
    ///
    /// Orders candidates exactly like the Euclidean distance without a sqrt.
    pub fn distance_sq(self, other: Position) -> u32 {
        let dx = self.x as i32 - other.x as i32;
        let dy = self.y as i32 - other.y as i32;
        (dx * dx + dy * dy) as u32
    }
}

/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Direction the active piece moves on its next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Left,
    Right,
    #[default]
    Down,
}

impl Direction {
    /// (dx, dy) for one step
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Sense of a shape rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Spin {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Spin {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn sign(&self) -> i8 {
        match self {
            Spin::Clockwise => 1,
            Spin::CounterClockwise => -1,
        }
    }
}

/// Phase of the delayed rotation protocol.
///
/// A successful rotation walks `Starting -> Coalesce -> Ending -> NotRotating`,
/// one step per tick. `Coalesce` draws the piece as its center cell only;
/// the new shape is swapped in when entering `Ending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationState {
    #[default]
    NotRotating,
    Starting,
    Coalesce,
    Ending,
}

impl RotationState {
    /// Next phase; `NotRotating` stays put.
    pub fn next(&self) -> Self {
        match self {
            RotationState::NotRotating => RotationState::NotRotating,
            RotationState::Starting => RotationState::Coalesce,
            RotationState::Coalesce => RotationState::Ending,
            RotationState::Ending => RotationState::NotRotating,
        }
    }

    pub fn is_rotating(&self) -> bool {
        !matches!(self, RotationState::NotRotating)
    }
}

/// Board edge a reservoir sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Reservoirs available when nothing else is configured, in priority order
pub const DEFAULT_RESERVOIRS: [Reservoir; 2] = [Reservoir::TopLeft, Reservoir::BottomLeft];

/// One of the four corner droplet sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reservoir {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl Reservoir {
    pub const ALL: [Reservoir; 4] = [
        Reservoir::TopLeft,
        Reservoir::BottomLeft,
        Reservoir::TopRight,
        Reservoir::BottomRight,
    ];

    pub fn side(&self) -> Side {
        match self {
            Reservoir::TopLeft | Reservoir::BottomLeft => Side::Left,
            Reservoir::TopRight | Reservoir::BottomRight => Side::Right,
        }
    }

    /// Bottom reservoirs have mirrored electrode wiring.
    pub fn is_bottom(&self) -> bool {
        matches!(self, Reservoir::BottomLeft | Reservoir::BottomRight)
    }

    /// Playable cell where a dispensed droplet appears
    pub fn target(&self) -> Position {
        let right = PLAY_WIDTH as i8 - 1;
        let bottom = PLAY_HEIGHT as i8 - 1;
        match self {
            Reservoir::TopLeft => Position::new(0, 0),
            Reservoir::BottomLeft => Position::new(0, bottom),
            Reservoir::TopRight => Position::new(right, 0),
            Reservoir::BottomRight => Position::new(right, bottom),
        }
    }

    /// Nibble as it must be written for this reservoir's wiring
    pub fn wire_nibble(&self, nibble: u8) -> u8 {
        if self.is_bottom() {
            reverse_nibble(nibble)
        } else {
            nibble & NIBBLE_MASK
        }
    }
}

/// Player intents accepted from the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
}

impl Intent {
    /// Parse intent from string (case-insensitive, camelCase or snake_case)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "").as_str() {
            "moveleft" | "left" => Some(Intent::MoveLeft),
            "moveright" | "right" => Some(Intent::MoveRight),
            "rotatecw" | "rotate" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_nibble_known_values() {
        assert_eq!(reverse_nibble(0b1010), 0b0101);
        assert_eq!(reverse_nibble(0b1100), 0b0011);
        assert_eq!(reverse_nibble(0b0111), 0b1110);
        assert_eq!(reverse_nibble(0b0000), 0b0000);
        assert_eq!(reverse_nibble(0b1111), 0b1111);
    }

    #[test]
    fn reverse_nibble_is_self_inverse() {
        for n in 0u8..16 {
            assert_eq!(reverse_nibble(reverse_nibble(n)), n);
        }
    }

    #[test]
    fn reverse_nibble_ignores_high_bits() {
        assert_eq!(reverse_nibble(0xF1), 0b1000);
    }

    #[test]
    fn reservoir_targets_sit_in_the_corners() {
        assert_eq!(Reservoir::TopLeft.target(), Position::new(0, 0));
        assert_eq!(Reservoir::BottomLeft.target(), Position::new(0, 7));
        assert_eq!(Reservoir::TopRight.target(), Position::new(13, 0));
        assert_eq!(Reservoir::BottomRight.target(), Position::new(13, 7));
    }

    #[test]
    fn wire_nibble_mirrors_bottom_only() {
        assert_eq!(Reservoir::TopRight.wire_nibble(0b1100), 0b1100);
        assert_eq!(Reservoir::BottomRight.wire_nibble(0b1100), 0b0011);
    }

    #[test]
    fn rotation_state_cycles_back_to_idle() {
        let mut state = RotationState::Starting;
        let mut steps = 0;
        while state.is_rotating() {
            state = state.next();
            steps += 1;
        }
        assert_eq!(steps, 3);
        assert_eq!(RotationState::NotRotating.next(), RotationState::NotRotating);
    }

    #[test]
    fn distances() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.distance_sq(b), 25);
    }

    #[test]
    fn intent_parsing() {
        assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
        assert_eq!(Intent::from_str("rotate_ccw"), Some(Intent::RotateCcw));
        assert_eq!(Intent::from_str("hold"), None);
    }

    #[test]
    fn reservoir_sides() {
        assert_eq!(Reservoir::ALL.len(), 4);
        assert!(Reservoir::BottomLeft.is_bottom());
        assert_eq!(Reservoir::TopRight.side(), Side::Right);
    }
}
