//! Dispense controller - turning queued cells into droplets
//!
//! A fill step either produces a new droplet (when none is in transit) or
//! moves the current one a single cell toward the head of the fill queue.
//! When the droplet reaches the head, the head is popped and the next fill
//! can start on a later step.
//!
//! Producing a droplet runs the dispense waveform on the chosen reservoir's
//! half of its special byte:
//!
//! 1. force the nibble to `0000`, transmit, wait one cleanup interval
//! 2. for each of the 7 waveform nibbles: write it (bit-reversed on bottom
//!    reservoirs), light the target cell on step 3, transmit, wait one
//!    movement interval
//! 3. write the resting nibble `1000` (again mirrored on the bottom),
//!    transmit, wait one cleanup interval
//!
//! Stalls (no reservoir available, no route) are logged and retried on the
//! next step; nothing here ever fails outright.

use crate::board::{Board, BoardState};
use crate::types::{Position, Reservoir, DEFAULT_NIBBLE, DISPENSE_WAVEFORM, DROP_FRAME_STEP};

impl BoardState {
    /// Available reservoir whose target is closest to `cell`.
    ///
    /// Straight-line distance; ties go to the earlier reservoir in the list.
    pub fn nearest_reservoir(&self, cell: Position) -> Option<Reservoir> {
        let mut best: Option<(Reservoir, u32)> = None;
        for &r in &self.reservoirs {
            let d = r.target().distance_sq(cell);
            match best {
                Some((_, best_d)) if best_d <= d => {}
                _ => best = Some((r, d)),
            }
        }
        best.map(|(r, _)| r)
    }
}

impl Board {
    /// Run the dispense waveform on `reservoir` and return the cell where
    /// the droplet appeared.
    pub fn dispense(&mut self, reservoir: Reservoir) -> Position {
        let target = reservoir.target();
        log::debug!("dispensing from {:?} to {:?}", reservoir, target);

        self.update_reservoir_state(reservoir, 0);
        self.transmit();
        self.clock.sleep(self.timing.cleanup);

        for (step, &pattern) in DISPENSE_WAVEFORM.iter().enumerate() {
            let nibble = reservoir.wire_nibble(pattern);
            self.update_reservoir_state(reservoir, nibble);
            if step == DROP_FRAME_STEP {
                self.state.matrix.set_play(target, true);
            }
            log::trace!("waveform step {} on {:?}: {:04b}", step, reservoir, nibble);
            self.transmit();
            self.clock.sleep(self.timing.movement);
        }

        self.update_reservoir_state(reservoir, reservoir.wire_nibble(DEFAULT_NIBBLE));
        self.transmit();
        self.clock.sleep(self.timing.cleanup);

        log::debug!("droplet ready at {:?}", target);
        target
    }

    /// Advance droplet filling by one step. No-op with an empty queue.
    pub fn fill_tick(&mut self) {
        let Some(&head) = self.state.fill_queue.front() else {
            return;
        };

        match self.state.in_transit {
            None => {
                let Some(reservoir) = self.state.nearest_reservoir(head) else {
                    log::warn!("fill stalled: no reservoir available for {:?}", head);
                    return;
                };
                let pos = self.dispense(reservoir);
                self.state.in_transit = Some(pos);
            }
            Some(current) => {
                let path = self.find_path(current, head);
                let Some(&next) = path.first() else {
                    log::warn!("fill stalled: no path from {:?} to {:?}", current, head);
                    return;
                };
                self.state.matrix.set_play(next, true);
                self.state.matrix.set_play(current, false);
                self.state.in_transit = Some(next);
            }
        }

        if self.state.in_transit == Some(head) {
            self.state.fill_queue.pop_front();
            self.state.in_transit = None;
        }
    }
}
