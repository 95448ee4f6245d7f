//! End-to-end runs of the falling-block game through the frame loop.
//!
//! Everything runs in virtual time: dispense waits advance the manual clock,
//! and each frame advances it one movement interval plus a millisecond.

use std::cell::RefCell;
use std::rc::Rc;

use droplet_tetris::core::{FixedPieces, SimpleRng};
use droplet_tetris::engine::{Board, BoardState, Engine, ManualClock, Tetris, Timing, WireFrame};
use droplet_tetris::types::{
    reverse_nibble, PieceKind, Position, Reservoir, DEFAULT_NIBBLE, DISPENSE_WAVEFORM, PLAY_HEIGHT,
    PLAY_WIDTH,
};

const TICK_MS: u64 = 20;
const MAX_FRAMES: usize = 20_000;

type Frames = Rc<RefCell<Vec<WireFrame>>>;

fn recording_board(clock: &ManualClock) -> (Board, Frames) {
    let frames: Frames = Rc::new(RefCell::new(Vec::new()));
    let sink = frames.clone();
    let board = Board::new(Timing::from_millis(TICK_MS, 50), Box::new(clock.clone()))
        .with_sink(move |f: &WireFrame, _: &BoardState| sink.borrow_mut().push(*f));
    (board, frames)
}

fn step<G: droplet_tetris::engine::Game>(engine: &mut Engine<G>, clock: &ManualClock) -> bool {
    clock.advance(TICK_MS + 1);
    engine.update()
}

#[test]
fn test_stacked_o_pieces_end_the_game() {
    let clock = ManualClock::new();
    let (board, _) = recording_board(&clock);
    let mut engine = Engine::new(board, Tetris::new(FixedPieces::new(vec![PieceKind::O])));
    engine.init();

    let mut frames = 0;
    while !engine.is_finished() && frames < MAX_FRAMES {
        step(&mut engine, &clock);
        frames += 1;
    }
    assert!(engine.is_finished(), "game never ended");

    // Four O pieces fill rows 0..8 in columns 5 and 6.
    let blocks = engine.game().static_blocks();
    assert_eq!(blocks.count(), 16);
    for y in 0..PLAY_HEIGHT as i8 {
        assert!(blocks.is_set(5, y) && blocks.is_set(6, y));
    }
    assert!(engine.game().active().is_none());

    // Finished: further frames change nothing but still transmit.
    let before = engine.board().state().clone();
    for _ in 0..20 {
        assert!(step(&mut engine, &clock));
    }
    assert_eq!(engine.board().state(), &before);
}

#[test]
fn test_blocked_spawn_ends_the_game() {
    // Horizontal I pieces fill rows 1..=7 and leave row 0 empty, so the
    // game can only end when the next I has nowhere to spawn.
    let clock = ManualClock::new();
    let (board, _) = recording_board(&clock);
    let mut engine = Engine::new(board, Tetris::new(FixedPieces::new(vec![PieceKind::I])));
    engine.init();

    for _ in 0..MAX_FRAMES {
        if engine.is_finished() {
            break;
        }
        step(&mut engine, &clock);
        let game = engine.game();
        if let Some(piece) = game.active() {
            assert!(piece.cells().iter().all(|c| !game.static_blocks().is_set(c.x, c.y)));
        }
    }

    assert!(engine.is_finished(), "blocked spawn did not end the game");
    assert_eq!(engine.game().static_blocks().count(), 28);
    assert!(engine.game().active().is_none());
    assert!(!engine.board().state().is_filling());
}

#[test]
fn test_restart_after_game_over() {
    let clock = ManualClock::new();
    let (board, _) = recording_board(&clock);
    let mut engine = Engine::new(board, Tetris::new(FixedPieces::new(vec![PieceKind::O])));
    engine.init();
    for _ in 0..MAX_FRAMES {
        if engine.is_finished() {
            break;
        }
        step(&mut engine, &clock);
    }
    assert!(engine.is_finished());

    engine.init();
    assert!(!engine.is_finished());
    assert_eq!(engine.game().static_blocks().count(), 0);
    assert_eq!(engine.board().state().fill_queue().len(), 4);
}

fn window_matches(frames: &[WireFrame], reservoir: Reservoir) -> bool {
    let read = |f: &WireFrame| {
        let byte = match reservoir {
            Reservoir::TopLeft | Reservoir::BottomLeft => f.left_special(),
            Reservoir::TopRight | Reservoir::BottomRight => f.right_special(),
        };
        if reservoir.is_bottom() {
            byte >> 4
        } else {
            byte & 0x0F
        }
    };

    let mut expected = vec![0u8];
    expected.extend(DISPENSE_WAVEFORM.iter().map(|&n| reservoir.wire_nibble(n)));
    expected.push(reservoir.wire_nibble(DEFAULT_NIBBLE));

    frames
        .windows(expected.len())
        .any(|w| w.iter().map(read).eq(expected.iter().copied()))
}

#[test]
fn test_bottom_reservoir_waveform_is_mirrored() {
    let clock = ManualClock::new();
    let (board, frames) = recording_board(&clock);
    let game = Tetris::new(FixedPieces::new(vec![PieceKind::T])).with_reservoirs([Reservoir::BottomLeft]);
    let mut engine = Engine::new(board, game);
    engine.init();

    // Resting nibble 1000 is wired as 0001 in the high half.
    assert_eq!(engine.board().state().left_special(), reverse_nibble(DEFAULT_NIBBLE) << 4);

    step(&mut engine, &clock);
    assert!(window_matches(&frames.borrow(), Reservoir::BottomLeft));
    assert!(!window_matches(&frames.borrow(), Reservoir::TopLeft));
    assert_eq!(engine.board().state().in_transit(), Some(Reservoir::BottomLeft.target()));
}

#[test]
fn test_top_reservoir_waveform_is_plain() {
    let clock = ManualClock::new();
    let (board, frames) = recording_board(&clock);
    let game = Tetris::new(FixedPieces::new(vec![PieceKind::T])).with_reservoirs([Reservoir::TopRight]);
    let mut engine = Engine::new(board, game);
    engine.init();

    assert_eq!(engine.board().state().right_special(), DEFAULT_NIBBLE);
    step(&mut engine, &clock);
    assert!(window_matches(&frames.borrow(), Reservoir::TopRight));
    assert_eq!(engine.board().state().left_special(), 0);
}

#[test]
fn test_frames_keep_layout_across_a_game() {
    let clock = ManualClock::new();
    let (board, frames) = recording_board(&clock);
    let mut engine = Engine::new(board, Tetris::new(SimpleRng::new(7)));
    engine.init();

    for _ in 0..400 {
        step(&mut engine, &clock);
        let state = engine.board().state();
        let frame = state.frame();
        assert_eq!(frame.left_special(), state.left_special());
        assert_eq!(frame.right_special(), state.right_special());
    }

    let frames = frames.borrow();
    assert!(frames.len() > 400);
    for frame in frames.iter() {
        assert!(frame.as_bytes()[WireFrame::RESERVED].iter().all(|&b| b == 0));
    }
}

#[test]
fn test_pieces_stay_in_bounds() {
    let clock = ManualClock::new();
    let (board, _) = recording_board(&clock);
    let mut engine = Engine::new(board, Tetris::new(SimpleRng::new(42)));
    engine.init();

    let in_bounds = |p: Position| {
        p.x >= 0 && p.x < PLAY_WIDTH as i8 && p.y >= 0 && p.y < PLAY_HEIGHT as i8
    };

    for i in 0..600 {
        // Push against the walls in both directions.
        let intent = if (i / 40) % 2 == 0 {
            droplet_tetris::types::Intent::MoveLeft
        } else {
            droplet_tetris::types::Intent::MoveRight
        };
        engine.game_mut().apply_intent(intent);
        if i % 7 == 0 {
            engine.game_mut().apply_intent(droplet_tetris::types::Intent::RotateCw);
        }
        step(&mut engine, &clock);

        if let Some(piece) = engine.game().active() {
            assert!(piece.cells().iter().all(|&c| in_bounds(c)), "piece out of bounds: {:?}", piece);
        }
        if let Some(pos) = engine.board().state().in_transit() {
            assert!(in_bounds(pos));
        }
        if engine.is_finished() {
            break;
        }
    }
}
