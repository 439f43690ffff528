//! Bounding-box normalization
//!
//! Strands grow in any direction, so a finished maze can sit bunched in one
//! corner. Re-centering the occupied box on unlocked axes keeps the playable
//! area framed without re-rolling the layout.

use super::base::clear_base_diagonals;
use super::walker::{Bounds, Walk};
use super::SpawnCell;
use crate::world::{Grid, Position};

/// A walk after the base diagonals are cleared and the content is re-framed
#[derive(Debug, Clone)]
pub struct Framed {
    pub grid: Grid,
    pub spawns: Vec<SpawnCell>,
    pub base: Position,
    pub shift: (i32, i32),
}

/// Clear the base diagonals and shift the occupied box toward the center.
///
/// Locked axes never move. Shifts truncate toward zero, which keeps the
/// shifted box inside the grid.
pub fn normalize(walk: Walk, base: Position) -> Framed {
    let Walk {
        mut grid,
        spawns,
        bounds,
        locks,
    } = walk;
    clear_base_diagonals(&mut grid, base);

    let (width, height) = (grid.width(), grid.height());
    if bounds.spans(width, height) {
        log::debug!("Bounding box spans the grid, skipping normalization");
        return Framed {
            grid,
            spawns,
            base,
            shift: (0, 0),
        };
    }

    let dx = if locks.x { 0 } else { centering_shift(bounds.x_min, bounds.x_max, width) };
    let dy = if locks.y { 0 } else { centering_shift(bounds.y_min, bounds.y_max, height) };
    if dx == 0 && dy == 0 {
        return Framed {
            grid,
            spawns,
            base,
            shift: (0, 0),
        };
    }

    log::debug!("Re-framing maze by ({}, {})", dx, dy);
    let grid = shifted(&grid, &bounds, dx, dy);
    let spawns = spawns
        .into_iter()
        .map(|spawn| SpawnCell {
            location: spawn.location.translate(dx, dy),
            direction: spawn.direction,
        })
        .collect();

    Framed {
        grid,
        spawns,
        base: base.translate(dx, dy),
        shift: (dx, dy),
    }
}

/// Shift that moves the span `min..=max` to the middle of `0..len`
pub fn centering_shift(min: i32, max: i32, len: i32) -> i32 {
    (len - 1 - max - min) / 2
}

/// Copy the cells inside `bounds` into a fresh grid, moved by (dx, dy)
fn shifted(grid: &Grid, bounds: &Bounds, dx: i32, dy: i32) -> Grid {
    let mut result = Grid::new(grid.width(), grid.height());
    for y in bounds.y_min..=bounds.y_max {
        for x in bounds.x_min..=bounds.x_max {
            let from = Position::new(x, y);
            if let Some(cell) = grid.get(from) {
                result.put(from.translate(dx, dy), *cell);
            }
        }
    }
    result
}
