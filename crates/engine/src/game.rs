//! Game capability trait and the frame-driven engine loop.

use crate::board::Board;

/// A game variant the engine can drive.
///
/// The engine owns the [`Board`] and lends it to the game for every hook, so
/// all mutation of the electrode state happens on one control path.
pub trait Game {
    /// Reset the board and game state and queue the first cells to fill.
    fn init(&mut self, board: &mut Board);

    /// Advance the game by one logic tick. Only called while no droplets are queued.
    fn tick(&mut self, board: &mut Board);

    /// Composite game cells onto the matrix. The engine overlays the droplet
    /// in transit afterwards.
    fn render(&self, board: &mut Board);

    /// Once true, no further ticks or fill steps run; render and transmit continue.
    fn is_finished(&self) -> bool;
}

/// Board plus the game driving it
pub struct Engine<G: Game> {
    board: Board,
    game: G,
    last_tick_ms: u64,
}

impl<G: Game> Engine<G> {
    pub fn new(board: Board, game: G) -> Self {
        let last_tick_ms = board.now_ms();
        Self {
            board,
            game,
            last_tick_ms,
        }
    }

    /// Initialize (or restart) the game. Must run before the first update.
    pub fn init(&mut self) {
        self.game.init(&mut self.board);
        self.last_tick_ms = self.board.now_ms();
        log::info!("engine initialized");
    }

    /// Run one display frame.
    ///
    /// Accepts a tick when more than one movement interval has elapsed since
    /// the last accepted one, then always renders and transmits.
    /// Returns whether a tick was accepted.
    pub fn update(&mut self) -> bool {
        let now = self.board.now_ms();
        let interval = self.board.timing().movement.as_millis() as u64;
        let accepted = now.saturating_sub(self.last_tick_ms) > interval;

        if accepted {
            self.last_tick_ms = now;
            if !self.game.is_finished() {
                if self.board.state().is_filling() {
                    self.board.fill_tick();
                } else {
                    self.game.tick(&mut self.board);
                }
            }
        }

        self.game.render(&mut self.board);
        self.board.render();
        self.board.transmit();
        accepted
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn is_finished(&self) -> bool {
        self.game.is_finished()
    }
}
