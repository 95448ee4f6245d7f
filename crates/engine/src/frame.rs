//! Wire frame - the 32-byte packet the electrode driver consumes
//!
//! | Offset | Meaning |
//! |---|---|
//! | 0 | left special-electrode byte |
//! | 1-14 | one byte per interior column, bit `y` set if row `y` is active |
//! | 15 | right special-electrode byte |
//! | 16-31 | reserved, always zero |
//!
//! Frames are built fresh for every transmit and never retained by the engine.

use std::fmt;
use std::ops::Range;

use crate::matrix::ElectrodeMatrix;
use crate::types::{FRAME_LEN, PLAY_WIDTH};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireFrame {
    bytes: [u8; FRAME_LEN],
}

impl WireFrame {
    pub const LEFT_SPECIAL: usize = 0;
    pub const COLUMNS: Range<usize> = 1..1 + PLAY_WIDTH as usize;
    pub const RIGHT_SPECIAL: usize = 1 + PLAY_WIDTH as usize;
    pub const RESERVED: Range<usize> = Self::RIGHT_SPECIAL + 1..FRAME_LEN;

    /// Encode the matrix and both special bytes
    pub fn encode(matrix: &ElectrodeMatrix, left_special: u8, right_special: u8) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[Self::LEFT_SPECIAL] = left_special;
        for offset in Self::COLUMNS {
            // Offset 1 is interior column 0, which is matrix column 1.
            bytes[offset] = matrix.column_byte(offset);
        }
        bytes[Self::RIGHT_SPECIAL] = right_special;
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    pub fn left_special(&self) -> u8 {
        self.bytes[Self::LEFT_SPECIAL]
    }

    pub fn right_special(&self) -> u8 {
        self.bytes[Self::RIGHT_SPECIAL]
    }

    /// Column byte for playable column `x`; 0 outside the grid
    pub fn column(&self, x: usize) -> u8 {
        if x >= PLAY_WIDTH as usize {
            return 0;
        }
        self.bytes[Self::COLUMNS.start + x]
    }
}

impl fmt::Debug for WireFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WireFrame[")?;
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        write!(f, "]")
    }
}

impl AsRef<[u8]> for WireFrame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
