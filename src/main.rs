//! Terminal preview runner (default binary).
//!
//! Drives the droplet engine from the keyboard and shows the electrode matrix
//! in the terminal. Raw frames go to `frame_out` when configured, so the same
//! run can feed a serial device.
//!
//! Usage: `droplet-tetris [config.json]`; `DROPLET_*` variables override the file.

use std::fs::OpenOptions;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use droplet_tetris::core::SimpleRng;
use droplet_tetris::engine::{Board, Engine, EngineConfig, SystemClock, Tetris, WriterSink};
use droplet_tetris::input::{handle_key_event, is_restart, should_quit};
use droplet_tetris::term::{BoardView, TerminalRenderer};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(&path)?.with_env_overrides()?,
        None => EngineConfig::from_env()?,
    };
    log::info!(
        "tick {} ms, cleanup {} ms, baud {}, seed {}",
        config.tick_ms,
        config.cleanup_ms,
        config.baud_rate,
        config.seed
    );

    let mut board = Board::from_config(&config, Box::new(SystemClock::new()));
    if let Some(path) = &config.frame_out {
        let out = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("opening frame output {}", path.display()))?;
        board = board.with_sink(WriterSink::new(out));
    }

    let game = Tetris::new(SimpleRng::new(config.seed)).with_reservoirs(config.reservoirs.clone());
    let mut engine = Engine::new(board, game);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut engine, &mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(engine: &mut Engine<Tetris<SimpleRng>>, term: &mut TerminalRenderer) -> Result<()> {
    let view = BoardView::default();
    engine.init();

    loop {
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_restart(key) {
                        engine.init();
                        term.invalidate();
                    } else if let Some(intent) = handle_key_event(key) {
                        engine.game_mut().apply_intent(intent);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        engine.update();
        term.draw(view.render_lines(engine.board().state(), engine.is_finished()))?;
    }
}
