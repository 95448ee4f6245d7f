//! Path module - droplet routing between two cells
//!
//! Droplets travel one electrode per tick along a Manhattan path: all
//! horizontal steps first, then all vertical steps. The start cell is not part
//! of the path, so its length always equals the Manhattan distance.

use crate::types::Position;

/// Compute the route from `start` to `end`, excluding `start`.
///
/// Returns an empty path when `start == end`.
pub fn find_path(start: Position, end: Position) -> Vec<Position> {
    let mut path = Vec::with_capacity(start.manhattan(end) as usize);
    let mut current = start;

    let step_x = (end.x as i16 - start.x as i16).signum() as i8;
    while current.x != end.x {
        current = current.offset(step_x, 0);
        path.push(current);
    }

    let step_y = (end.y as i16 - start.y as i16).signum() as i8;
    while current.y != end.y {
        current = current.offset(0, step_y);
        path.push(current);
    }

    path
}
