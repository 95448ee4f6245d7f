//! Terminal preview of the electrode board.
//!
//! Shows what the hardware would see: the playable electrodes, both special
//! bytes and the droplet routing state. Drawing is a full redraw of a handful
//! of text lines, skipped when nothing changed.

pub mod renderer;
pub mod view;

pub use droplet_tetris_engine as engine;
pub use droplet_tetris_types as types;

pub use renderer::{encode_lines_into, TerminalRenderer};
pub use view::BoardView;
