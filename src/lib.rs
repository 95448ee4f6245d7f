//! Droplet Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, tests and
//! benches can write `droplet_tetris::engine::Engine` and friends.

pub use droplet_tetris_core as core;
pub use droplet_tetris_engine as engine;
pub use droplet_tetris_input as input;
pub use droplet_tetris_term as term;
pub use droplet_tetris_types as types;
