//! Flow field queries
//!
//! Path and spawn cells store the direction back toward the base, so a mover
//! only needs to look up the cell it stands on to know where to go next.

use super::{CellType, Direction, Grid, Position};

/// Direction to move from `pos`, `None` on the base or off the network
pub fn flow_at(grid: &Grid, pos: Position) -> Option<Direction> {
    let cell = grid.get(pos)?;
    match cell.cell_type {
        CellType::Path | CellType::Spawn => cell.direction,
        _ => None,
    }
}

/// The cell a mover on `pos` steps to next
pub fn next_cell(grid: &Grid, pos: Position) -> Option<Position> {
    flow_at(grid, pos).map(|dir| pos.offset(dir))
}

/// Follow the flow field from `from` until the base is reached.
///
/// The returned route starts at `from` and ends on the base cell. `None` if
/// the chain leaves the network or loops.
pub fn trace_to_base(grid: &Grid, from: Position) -> Option<Vec<Position>> {
    let limit = (grid.width() * grid.height()) as usize;
    let mut route = vec![from];
    let mut pos = from;

    while grid.cell_type(pos)? != CellType::Base {
        if route.len() > limit {
            return None;
        }
        pos = next_cell(grid, pos)?;
        route.push(pos);
    }

    Some(route)
}
