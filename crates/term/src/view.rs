//! BoardView: maps a `BoardState` into text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::engine::BoardState;
use crate::types::{Position, Reservoir, PLAY_HEIGHT, PLAY_WIDTH};

/// Text layout for the board preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardView {
    active: &'static str,
    empty: &'static str,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2 chars per cell keeps the grid roughly square.
        Self {
            active: "[]",
            empty: " .",
        }
    }
}

impl BoardView {
    pub fn new(active: &'static str, empty: &'static str) -> Self {
        Self { active, empty }
    }

    /// Render the board, one string per terminal row.
    pub fn render_lines(&self, state: &BoardState, finished: bool) -> Vec<String> {
        let width = PLAY_WIDTH as usize * self.active.chars().count();
        let mut lines = Vec::with_capacity(PLAY_HEIGHT as usize + 5);

        lines.push(format!(
            "L {:08b}  R {:08b}",
            state.left_special(),
            state.right_special()
        ));
        lines.push(format!("  +{}+", "-".repeat(width)));

        for y in 0..PLAY_HEIGHT as i8 {
            let mut row = String::with_capacity(width + 6);
            row.push_str(reservoir_marker(state, Reservoir::TopLeft, Reservoir::BottomLeft, y));
            row.push('|');
            for x in 0..PLAY_WIDTH as i8 {
                let on = state.matrix().is_active_play(Position::new(x, y));
                row.push_str(if on { self.active } else { self.empty });
            }
            row.push('|');
            row.push_str(reservoir_marker(state, Reservoir::TopRight, Reservoir::BottomRight, y));
            lines.push(row);
        }

        lines.push(format!("  +{}+", "-".repeat(width)));

        let transit = match state.in_transit() {
            Some(p) => format!("({},{})", p.x, p.y),
            None => "-".to_string(),
        };
        lines.push(format!(
            "queued {:>2}  droplet {}",
            state.fill_queue().len(),
            transit
        ));
        if finished {
            lines.push("GAME OVER  r: restart  q: quit".to_string());
        }
        lines
    }
}

/// `<>` beside the corner row of an available reservoir
fn reservoir_marker(state: &BoardState, top: Reservoir, bottom: Reservoir, y: i8) -> &'static str {
    let here = [top, bottom]
        .into_iter()
        .any(|r| r.target().y == y && state.reservoirs().contains(&r));
    if here {
        "<>"
    } else {
        "  "
    }
}
