//! Core module - pure geometry and randomness with no hardware dependencies
//!
//! Everything in this crate is deterministic and side-effect free, which keeps
//! it easy to test and lets the board engine treat it as plain data:
//!
//! - [`grid`]: bounds-checked boolean grid shared by the electrode matrix and
//!   the static block grid
//! - [`shapes`]: the seven piece shapes and the square-matrix rotation
//! - [`path`]: Manhattan droplet routing (horizontal first, then vertical)
//! - [`rng`]: seeded piece selection behind the [`PieceSource`] trait
//!
//! # Example
//!
//! ```
//! use droplet_tetris_core::{find_path, rotate, shape_of};
//! use droplet_tetris_core::types::{PieceKind, Position, Spin};
//!
//! let t = shape_of(PieceKind::T);
//! assert_eq!(rotate(&rotate(&t, Spin::Clockwise), Spin::CounterClockwise), t);
//!
//! let path = find_path(Position::new(0, 0), Position::new(2, 1));
//! assert_eq!(path.len(), 3);
//! ```

pub mod grid;
pub mod path;
pub mod rng;
pub mod shapes;

pub use droplet_tetris_types as types;

// Re-export commonly used types for convenience
pub use grid::{BitGrid, PlayGrid};
pub use path::find_path;
pub use rng::{FixedPieces, PieceSource, SimpleRng};
pub use shapes::{rotate, shape_of, Shape, MAX_SHAPE_SIZE};
