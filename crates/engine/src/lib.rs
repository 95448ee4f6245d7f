//! Board engine - drives the electrode grid from game logic
//!
//! The engine couples two clocks that must never drift apart: the game's
//! logic tick (piece falls, moves, rotations) and the slower, hardware-paced
//! droplet protocol (dispense waveforms and one-cell-per-tick routing).
//!
//! # Module Structure
//!
//! - [`matrix`]: the 16x8 electrode matrix with playable-area helpers
//! - [`frame`]: the bit-exact 32-byte wire frame encoder
//! - [`sink`]: where encoded frames go ([`FrameSink`] and stock sinks)
//! - [`clock`]: time source and timed waits ([`Clock`])
//! - [`board`]: [`Board`] and [`BoardState`] (matrix, special bytes, fill queue)
//! - [`dispense`]: reservoir selection, dispense waveform and droplet routing
//! - [`game`]: the [`Game`] capability trait and the frame-driven [`Engine`]
//! - [`tetris`]: the falling-block piece state machine
//! - [`config`]: [`EngineConfig`] loading from JSON and environment
//!
//! # Frame Loop
//!
//! Call [`Engine::update`] once per display refresh. When more than one
//! movement interval has elapsed since the last accepted tick, the engine runs
//! either one fill step (if droplets are still queued) or one game tick, never
//! both. Render and transmit happen on every call regardless.
//!
//! # Example
//!
//! ```
//! use droplet_tetris_engine::{Board, Engine, EngineConfig, ManualClock, Tetris};
//! use droplet_tetris_engine::core::SimpleRng;
//!
//! let config = EngineConfig::default();
//! let clock = ManualClock::new();
//! let board = Board::from_config(&config, Box::new(clock.clone()));
//! let mut engine = Engine::new(board, Tetris::new(SimpleRng::new(config.seed)));
//! engine.init();
//!
//! clock.advance(config.tick_ms + 1);
//! engine.update();
//! assert!(engine.board().state().in_transit().is_some());
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod dispense;
pub mod frame;
pub mod game;
pub mod matrix;
pub mod sink;
pub mod tetris;

pub use droplet_tetris_core as core;
pub use droplet_tetris_types as types;

pub use board::{Board, BoardState, Timing};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use frame::WireFrame;
pub use game::{Engine, Game};
pub use matrix::ElectrodeMatrix;
pub use sink::{ChannelSink, FrameSink, WriterSink};
pub use tetris::{Piece, Tetris};
