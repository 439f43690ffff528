//! Base placement
//!
//! The base region is the base cell plus its in-bounds diagonal neighbors.
//! The diagonals only block strand growth; they revert to ground once walking is done.

use rand::Rng;

use crate::world::{CellType, Grid, Position};

const DIAGONALS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Mark the base cell and its diagonals as `Base`
pub fn mark_base_region(grid: &mut Grid, base: Position) {
    grid.set_type(base, CellType::Base);
    for (dx, dy) in DIAGONALS {
        grid.set_type(base.translate(dx, dy), CellType::Base);
    }
}

/// Return the diagonals to ground, leaving only the base cell itself
pub fn clear_base_diagonals(grid: &mut Grid, base: Position) {
    for (dx, dy) in DIAGONALS {
        grid.set_type(base.translate(dx, dy), CellType::Ground);
    }
}

/// The grid edge the base sits on, per axis. Spawns may not appear on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseEdges {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl BaseEdges {
    pub fn of(base: Position, width: i32, height: i32) -> Self {
        let on_edge = |v: i32, len: i32| (v == 0 || v == len - 1).then_some(v);
        Self {
            x: on_edge(base.x, width),
            y: on_edge(base.y, height),
        }
    }
}

/// Where the base goes when it is derived from the seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseEdge {
    Center,
    Top,
    Left,
    Bottom,
    Right,
}

impl BaseEdge {
    fn from_roll(roll: u32) -> Self {
        match roll {
            1 => BaseEdge::Top,
            2 => BaseEdge::Left,
            3 => BaseEdge::Bottom,
            4 => BaseEdge::Right,
            _ => BaseEdge::Center,
        }
    }
}

/// Base position and strand count drawn from the RNG stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseSite {
    pub edge: BaseEdge,
    pub position: Position,
    pub strands: u32,
}

/// Pick a base edge, a jittered position on it and a strand count.
///
/// A centered base grows three or four strands, an edge base two or three.
/// Positions are clamped into the grid for layouts narrower than the jitter.
pub fn choose_base<R: Rng + ?Sized>(rng: &mut R, width: i32, height: i32) -> BaseSite {
    // first draw is discarded
    let _: u32 = rng.gen();

    let edge = BaseEdge::from_roll(rng.gen_range(0..5));
    let strands = match edge {
        BaseEdge::Center => rng.gen_range(3..5),
        _ => rng.gen_range(2..4),
    };
    let offset = rng.gen_range(-2..3);

    let (cx, cy) = (width / 2, height / 2);
    let position = match edge {
        BaseEdge::Top => Position::new(cx + offset, height - 1),
        BaseEdge::Left => Position::new(0, cy + offset),
        BaseEdge::Bottom => Position::new(cx + offset, 0),
        BaseEdge::Right => Position::new(width - 1, cy + offset),
        BaseEdge::Center => Position::new(cx + offset, cy + rng.gen_range(-2..3)),
    };
    let position = Position::new(position.x.clamp(0, width - 1), position.y.clamp(0, height - 1));

    BaseSite {
        edge,
        position,
        strands,
    }
}
