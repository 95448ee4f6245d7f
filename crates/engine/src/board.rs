//! Board module - electrode state plus the hardware-facing side of the engine
//!
//! [`BoardState`] is the plain data: electrode matrix, the two special bytes,
//! the fill queue, the droplet in transit and the reservoir availability list.
//! [`Board`] wraps it with the frame sink, the clock and the timing
//! parameters, and provides render/transmit/clear plus the dispense controller
//! (see [`crate::dispense`]).

use std::collections::VecDeque;
use std::time::Duration;

use arrayvec::ArrayVec;

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::frame::WireFrame;
use crate::matrix::ElectrodeMatrix;
use crate::sink::FrameSink;
use crate::types::{Position, Reservoir, Side, NIBBLE_MASK};

/// Movement and cleanup intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Minimum time between accepted ticks; also the wait between waveform steps
    pub movement: Duration,
    /// Settle time before and after each dispense
    pub cleanup: Duration,
}

impl Timing {
    pub fn from_millis(movement_ms: u64, cleanup_ms: u64) -> Self {
        Self {
            movement: Duration::from_millis(movement_ms),
            cleanup: Duration::from_millis(cleanup_ms),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self::from_millis(config.tick_ms, config.cleanup_ms)
    }
}

/// Electrode-side state, shared read-only with frame sinks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    pub(crate) matrix: ElectrodeMatrix,
    pub(crate) left_special: u8,
    pub(crate) right_special: u8,
    pub(crate) fill_queue: VecDeque<Position>,
    pub(crate) in_transit: Option<Position>,
    pub(crate) reservoirs: ArrayVec<Reservoir, 4>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matrix(&self) -> &ElectrodeMatrix {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut ElectrodeMatrix {
        &mut self.matrix
    }

    pub fn left_special(&self) -> u8 {
        self.left_special
    }

    pub fn right_special(&self) -> u8 {
        self.right_special
    }

    /// Special byte for one side
    pub fn special(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left_special,
            Side::Right => self.right_special,
        }
    }

    /// Current 4-bit value of a reservoir's half-byte
    pub fn reservoir_nibble(&self, reservoir: Reservoir) -> u8 {
        let byte = self.special(reservoir.side());
        if reservoir.is_bottom() {
            byte >> 4
        } else {
            byte & NIBBLE_MASK
        }
    }

    /// Write a 4-bit value into the reservoir's half of its side's byte.
    ///
    /// Top reservoirs own the low nibble, bottom reservoirs the high one.
    /// The value is masked to 4 bits and written as given (no mirroring).
    pub fn update_reservoir_state(&mut self, reservoir: Reservoir, nibble: u8) {
        let nibble = nibble & NIBBLE_MASK;
        let byte = match reservoir.side() {
            Side::Left => &mut self.left_special,
            Side::Right => &mut self.right_special,
        };
        *byte = if reservoir.is_bottom() {
            (*byte & NIBBLE_MASK) | (nibble << 4)
        } else {
            (*byte & !NIBBLE_MASK) | nibble
        };
    }

    /// Queue a cell to receive a droplet
    pub fn queue_fill(&mut self, pos: Position) {
        self.fill_queue.push_back(pos);
    }

    pub fn fill_queue(&self) -> &VecDeque<Position> {
        &self.fill_queue
    }

    pub fn is_queued(&self, pos: Position) -> bool {
        self.fill_queue.contains(&pos)
    }

    /// Droplets still owed to the grid
    pub fn is_filling(&self) -> bool {
        !self.fill_queue.is_empty()
    }

    pub fn in_transit(&self) -> Option<Position> {
        self.in_transit
    }

    /// Drop every pending fill and forget the droplet in transit
    pub fn reset_fill(&mut self) {
        self.fill_queue.clear();
        self.in_transit = None;
    }

    /// Reservoirs that may dispense, in priority order
    pub fn reservoirs(&self) -> &[Reservoir] {
        &self.reservoirs
    }

    /// Replace the availability list; duplicates are ignored
    pub fn set_reservoirs(&mut self, reservoirs: impl IntoIterator<Item = Reservoir>) {
        self.reservoirs.clear();
        for r in reservoirs {
            if !self.reservoirs.contains(&r) {
                self.reservoirs.push(r);
            }
        }
    }

    /// Mark one reservoir available (appended last) or unavailable
    pub fn set_reservoir_available(&mut self, reservoir: Reservoir, available: bool) {
        let present = self.reservoirs.iter().position(|&r| r == reservoir);
        match (present, available) {
            (None, true) => self.reservoirs.push(reservoir),
            (Some(i), false) => {
                self.reservoirs.remove(i);
            }
            _ => {}
        }
    }

    /// Encode the current matrix and special bytes
    pub fn frame(&self) -> WireFrame {
        WireFrame::encode(&self.matrix, self.left_special, self.right_special)
    }
}

/// Board state plus its sink, clock and timing
pub struct Board {
    pub(crate) state: BoardState,
    pub(crate) sink: Option<Box<dyn FrameSink>>,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) timing: Timing,
}

impl Board {
    /// Board without a sink; frames are discarded until one is set
    pub fn new(timing: Timing, clock: Box<dyn Clock>) -> Self {
        Self {
            state: BoardState::new(),
            sink: None,
            clock,
            timing,
        }
    }

    /// Board with the configured timing; reservoir availability is set by the game on init
    pub fn from_config(config: &EngineConfig, clock: Box<dyn Clock>) -> Self {
        Self::new(config.timing(), clock)
    }

    pub fn with_sink(mut self, sink: impl FrameSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BoardState {
        &mut self.state
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Encode the current state and hand it to the sink, if any
    pub fn transmit(&mut self) {
        let frame = self.state.frame();
        if let Some(sink) = self.sink.as_mut() {
            sink.send(&frame, &self.state);
        }
    }

    /// Overlay the droplet in transit onto the matrix.
    ///
    /// Games composite their own cells first; this only adds the droplet.
    pub fn render(&mut self) {
        if let Some(pos) = self.state.in_transit {
            self.state.matrix.set_play(pos, true);
        }
    }

    /// Zero the matrix and both special bytes, then transmit once
    pub fn clear(&mut self) {
        self.state.matrix.clear();
        self.state.left_special = 0;
        self.state.right_special = 0;
        self.transmit();
    }

    pub fn update_reservoir_state(&mut self, reservoir: Reservoir, nibble: u8) {
        self.state.update_reservoir_state(reservoir, nibble);
    }

    /// Manhattan route between two cells, horizontal first, start excluded
    pub fn find_path(&self, start: Position, end: Position) -> Vec<Position> {
        crate::core::find_path(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_board() -> (Board, Rc<RefCell<Vec<WireFrame>>>) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink_frames = frames.clone();
        let board = Board::new(Timing::default(), Box::new(ManualClock::new()))
            .with_sink(move |f: &WireFrame, _: &BoardState| sink_frames.borrow_mut().push(*f));
        (board, frames)
    }

    #[test]
    fn test_update_reservoir_state_halves() {
        let mut state = BoardState::new();
        state.update_reservoir_state(Reservoir::TopLeft, 0b1000);
        state.update_reservoir_state(Reservoir::BottomLeft, 0b0001);
        assert_eq!(state.left_special(), 0x18);
        assert_eq!(state.right_special(), 0);

        state.update_reservoir_state(Reservoir::TopRight, 0b0101);
        state.update_reservoir_state(Reservoir::BottomRight, 0b1111);
        assert_eq!(state.right_special(), 0xF5);

        assert_eq!(state.reservoir_nibble(Reservoir::BottomRight), 0b1111);
        assert_eq!(state.reservoir_nibble(Reservoir::TopRight), 0b0101);
    }

    #[test]
    fn test_update_reservoir_state_masks() {
        let mut state = BoardState::new();
        state.update_reservoir_state(Reservoir::TopLeft, 0xF3);
        assert_eq!(state.left_special(), 0x03);
        state.update_reservoir_state(Reservoir::BottomLeft, 0xA7);
        assert_eq!(state.left_special(), 0x73);
    }

    #[test]
    fn test_clear_zeroes_and_transmits_once() {
        let (mut board, frames) = recording_board();
        board.state_mut().matrix_mut().set_play(Position::new(3, 3), true);
        board.update_reservoir_state(Reservoir::TopLeft, 0b1010);

        board.clear();

        let frames = frames.borrow();
        assert_eq!(frames.len(), 1);
        assert!(frames[0].as_bytes().iter().all(|&b| b == 0));
        assert_eq!(board.state().left_special(), 0);
    }

    #[test]
    fn test_transmit_without_sink_is_silent() {
        let mut board = Board::new(Timing::default(), Box::new(ManualClock::new()));
        board.transmit();
        board.clear();
    }

    #[test]
    fn test_render_overlays_transit() {
        let (mut board, _) = recording_board();
        board.state_mut().in_transit = Some(Position::new(4, 2));
        board.render();
        assert!(board.state().matrix().is_active_play(Position::new(4, 2)));
    }

    #[test]
    fn test_reservoir_availability() {
        let mut state = BoardState::new();
        state.set_reservoirs([Reservoir::TopLeft, Reservoir::TopLeft, Reservoir::BottomLeft]);
        assert_eq!(state.reservoirs(), &[Reservoir::TopLeft, Reservoir::BottomLeft]);

        state.set_reservoir_available(Reservoir::TopLeft, false);
        state.set_reservoir_available(Reservoir::TopRight, true);
        state.set_reservoir_available(Reservoir::TopRight, true);
        assert_eq!(state.reservoirs(), &[Reservoir::BottomLeft, Reservoir::TopRight]);
    }

    #[test]
    fn test_fill_queue_is_fifo() {
        let mut state = BoardState::new();
        state.queue_fill(Position::new(1, 1));
        state.queue_fill(Position::new(2, 2));
        assert_eq!(state.fill_queue().front(), Some(&Position::new(1, 1)));
        assert!(state.is_queued(Position::new(2, 2)));
        state.reset_fill();
        assert!(!state.is_filling());
    }
}
