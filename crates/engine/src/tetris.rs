//! Tetris - the falling-block piece state machine
//!
//! Pieces spawn at a fixed anchor and are not drawn until their droplets have
//! been dispensed and routed into place (the spawn primes every occupied cell
//! into the board's fill queue). Once materialized, the piece falls one cell
//! per tick; a queued left/right intent replaces the fall for that one tick.
//!
//! Rotation is delayed to match the physical droplets: a valid request enters
//! `Starting`, the next tick collapses the piece onto its bounding-box center
//! (`Coalesce`), the one after swaps in the rotated shape (`Ending`) and a
//! final tick returns to `NotRotating`. The piece does not move meanwhile.
//!
//! A piece lands when any occupied cell has the floor or a static block
//! directly below it. Landing merges it into the static grid; any static block
//! on the top-level row ends the game, as does a new piece that does not fit
//! at the spawn anchor. Rows are never cleared.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::core::{rotate, shape_of, PieceSource, PlayGrid, Shape};
use crate::game::Game;
use crate::types::{
    Direction, Intent, PieceKind, Position, Reservoir, RotationState, Spin, DEFAULT_NIBBLE,
    DEFAULT_RESERVOIRS, PLAY_HEIGHT, SPAWN_POSITION, TOP_LEVEL_ROW,
};

/// Maximum cells a piece can occupy (full 4x4 box)
const MAX_PIECE_CELLS: usize = 16;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Top-left corner of the bounding box, playable coordinates
    pub position: Position,
}

impl Piece {
    /// Create a new piece at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: shape_of(kind),
            position: SPAWN_POSITION,
        }
    }

    /// Occupied cells, row-major
    pub fn cells(&self) -> ArrayVec<Position, MAX_PIECE_CELLS> {
        self.shape.cells_at(self.position).collect()
    }

    /// Center cell drawn while coalescing
    pub fn center(&self) -> Position {
        self.shape.center_at(self.position)
    }
}

/// Check that every occupied cell is in bounds and free of static blocks
fn fits(shape: &Shape, position: Position, blocks: &PlayGrid) -> bool {
    shape
        .cells_at(position)
        .all(|c| matches!(blocks.get(c.x, c.y), Some(false)))
}

/// Falling-block game over the electrode grid
#[derive(Debug, Clone)]
pub struct Tetris<P: PieceSource> {
    source: P,
    static_blocks: PlayGrid,
    active: Option<Piece>,
    movement: Direction,
    rotate_request: Option<Spin>,
    rotation: RotationState,
    pending_shape: Option<Shape>,
    finished: bool,
    reservoirs: ArrayVec<Reservoir, 4>,
}

impl<P: PieceSource> Tetris<P> {
    /// New game drawing pieces from `source`, dispensing from
    /// [`DEFAULT_RESERVOIRS`].
    pub fn new(source: P) -> Self {
        let reservoirs = DEFAULT_RESERVOIRS.into_iter().collect();
        Self {
            source,
            static_blocks: PlayGrid::new(),
            active: None,
            movement: Direction::Down,
            rotate_request: None,
            rotation: RotationState::NotRotating,
            pending_shape: None,
            finished: false,
            reservoirs,
        }
    }

    /// Reservoirs made available on init, in priority order
    pub fn with_reservoirs(mut self, reservoirs: impl IntoIterator<Item = Reservoir>) -> Self {
        self.reservoirs.clear();
        for r in reservoirs {
            if !self.reservoirs.contains(&r) {
                self.reservoirs.push(r);
            }
        }
        self
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn static_blocks(&self) -> &PlayGrid {
        &self.static_blocks
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn movement(&self) -> Direction {
        self.movement
    }

    pub fn rotate_requested(&self) -> bool {
        self.rotate_request.is_some()
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Set the direction for the next tick's move; ignored once finished
    pub fn set_movement(&mut self, direction: Direction) {
        if self.finished {
            return;
        }
        self.movement = direction;
    }

    /// Ask for a rotation on the next tick; ignored once finished
    pub fn request_rotation(&mut self, spin: Spin) {
        if self.finished {
            return;
        }
        self.rotate_request = Some(spin);
    }

    pub fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::MoveLeft => self.set_movement(Direction::Left),
            Intent::MoveRight => self.set_movement(Direction::Right),
            Intent::RotateCw => self.request_rotation(Spin::Clockwise),
            Intent::RotateCcw => self.request_rotation(Spin::CounterClockwise),
        }
    }

    /// Spawn the next piece and queue its cells for filling.
    ///
    /// A piece that does not fit at the spawn position ends the game unprimed.
    fn spawn(&mut self, board: &mut Board) {
        let piece = Piece::new(self.source.next_kind());
        if !fits(&piece.shape, piece.position, &self.static_blocks) {
            self.finished = true;
            log::info!("game over: {} blocked at spawn", piece.kind.as_str());
            return;
        }
        for cell in piece.cells() {
            board.state_mut().queue_fill(cell);
        }
        log::debug!("spawned {} at {:?}", piece.kind.as_str(), piece.position);
        self.active = Some(piece);
    }

    /// Try to move the active piece one step
    pub(crate) fn try_move(&mut self, direction: Direction) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let (dx, dy) = direction.delta();
        let target = piece.position.offset(dx, dy);
        if fits(&piece.shape, target, &self.static_blocks) {
            piece.position = target;
            return true;
        }
        false
    }

    /// Validate a rotation and enter `Starting`; invalid requests are dropped
    fn try_begin_rotation(&mut self, spin: Spin) -> bool {
        if self.rotation.is_rotating() {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };
        let rotated = rotate(&piece.shape, spin);
        if !fits(&rotated, piece.position, &self.static_blocks) {
            log::debug!("rotation of {} blocked", piece.kind.as_str());
            return false;
        }
        self.pending_shape = Some(rotated);
        self.rotation = RotationState::Starting;
        true
    }

    fn advance_rotation(&mut self) {
        let next = self.rotation.next();
        if next == RotationState::Ending {
            if let (Some(piece), Some(shape)) = (self.active.as_mut(), self.pending_shape.take()) {
                piece.shape = shape;
            }
        }
        self.rotation = next;
    }

    /// Floor or a static block directly below any occupied cell
    fn is_landed(&self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        piece
            .cells()
            .iter()
            .any(|c| c.y + 1 >= PLAY_HEIGHT as i8 || self.static_blocks.is_set(c.x, c.y + 1))
    }

    fn land(&mut self, board: &mut Board) {
        self.rotation = RotationState::NotRotating;
        self.pending_shape = None;

        let Some(piece) = self.active.take() else {
            return;
        };
        for cell in piece.cells() {
            self.static_blocks.set_at(cell, true);
        }
        log::debug!("{} landed at {:?}", piece.kind.as_str(), piece.position);

        if self.static_blocks.row_any(TOP_LEVEL_ROW) {
            self.finished = true;
            log::info!("game over: blocks reached row {}", TOP_LEVEL_ROW);
            return;
        }

        self.spawn(board);
    }
}

impl<P: PieceSource> Game for Tetris<P> {
    fn init(&mut self, board: &mut Board) {
        board.clear();
        board.state_mut().reset_fill();

        self.static_blocks.clear();
        self.active = None;
        self.movement = Direction::Down;
        self.rotate_request = None;
        self.rotation = RotationState::NotRotating;
        self.pending_shape = None;
        self.finished = false;

        board.state_mut().set_reservoirs(self.reservoirs.iter().copied());
        for &r in &self.reservoirs {
            board.update_reservoir_state(r, r.wire_nibble(DEFAULT_NIBBLE));
        }

        self.spawn(board);
    }

    fn tick(&mut self, board: &mut Board) {
        if self.finished {
            return;
        }

        let started = match self.rotate_request.take() {
            Some(spin) => self.try_begin_rotation(spin),
            None => false,
        };

        if !self.rotation.is_rotating() {
            self.try_move(self.movement);
            self.movement = Direction::Down;
        } else if !started {
            self.advance_rotation();
        }

        if self.is_landed() {
            self.land(board);
        }
    }

    fn render(&self, board: &mut Board) {
        let state = board.state_mut();
        let filling = state.is_filling();
        let queued: ArrayVec<Position, MAX_PIECE_CELLS> = state
            .fill_queue()
            .iter()
            .take(MAX_PIECE_CELLS)
            .copied()
            .collect();

        let matrix = state.matrix_mut();
        matrix.clear();
        for cell in self.static_blocks.iter_set() {
            matrix.set_play(cell, true);
        }

        let Some(piece) = self.active else {
            return;
        };
        if self.rotation == RotationState::Coalesce {
            matrix.set_play(piece.center(), true);
        } else if filling {
            for cell in piece.cells() {
                if !queued.contains(&cell) {
                    matrix.set_play(cell, true);
                }
            }
        } else {
            for cell in piece.cells() {
                matrix.set_play(cell, true);
            }
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
