//! Path walker
//!
//! Grows self-avoiding strands from the base until each one reaches a grid edge.
//! Every stepped cell records its distance from the base and the direction back
//! toward it, which together form the flow field enemies follow.

use rand::Rng;

use super::base::{mark_base_region, BaseEdges};
use super::SpawnCell;
use crate::world::{CellType, Direction, Grid, Position};

/// Bounding box of every cell touched while walking (base included)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Bounds {
    pub fn around(pos: Position) -> Self {
        Self {
            x_min: pos.x,
            x_max: pos.x,
            y_min: pos.y,
            y_max: pos.y,
        }
    }

    pub fn include(&mut self, pos: Position) {
        self.x_min = self.x_min.min(pos.x);
        self.x_max = self.x_max.max(pos.x);
        self.y_min = self.y_min.min(pos.y);
        self.y_max = self.y_max.max(pos.y);
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.x_min..=self.x_max).contains(&pos.x) && (self.y_min..=self.y_max).contains(&pos.y)
    }

    /// True when the box already touches all four grid edges
    pub fn spans(&self, width: i32, height: i32) -> bool {
        self.x_min == 0 && self.y_min == 0 && self.x_max == width - 1 && self.y_max == height - 1
    }
}

/// Axes on which a spawn pinned the maze against an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisLocks {
    pub x: bool,
    pub y: bool,
}

/// Result of a successful walk, before normalization
#[derive(Debug, Clone)]
pub struct Walk {
    pub grid: Grid,
    pub spawns: Vec<SpawnCell>,
    pub bounds: Bounds,
    pub locks: AxisLocks,
}

/// A strand ran out of valid moves (or steps)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlock {
    pub strand: u32,
    pub at: Position,
    pub steps: u32,
}

/// Grow `strands` strands from `base` on a fresh `width` x `height` grid.
///
/// Strands share the grid and never touch each other. The whole walk is
/// abandoned on the first deadlock; callers retry from scratch.
pub fn walk_strands<R: Rng + ?Sized>(
    rng: &mut R,
    width: i32,
    height: i32,
    base: Position,
    strands: u32,
    step_budget: u32,
) -> Result<Walk, Deadlock> {
    let mut grid = Grid::new(width, height);
    mark_base_region(&mut grid, base);

    let edges = BaseEdges::of(base, width, height);
    let mut walk = Walk {
        grid,
        spawns: Vec::with_capacity(strands as usize),
        bounds: Bounds::around(base),
        locks: AxisLocks::default(),
    };

    for strand in 0..strands {
        grow_strand(rng, &mut walk, base, edges, step_budget)
            .map_err(|(at, steps)| Deadlock { strand, at, steps })?;
    }

    Ok(walk)
}

/// Walk a single strand until it turns into a spawn
fn grow_strand<R: Rng + ?Sized>(
    rng: &mut R,
    walk: &mut Walk,
    base: Position,
    edges: BaseEdges,
    step_budget: u32,
) -> Result<(), (Position, u32)> {
    let mut cursor = base;
    let mut last_dir: Option<Direction> = None;
    let mut forbidden: Option<Direction> = None;

    for step in 0..step_budget {
        let distance = walk.grid.get(cursor).map_or(0, |c| c.distance);
        let order = priority_order(rng, last_dir);
        let Some(dir) = order
            .into_iter()
            .find(|&dir| Some(dir) != forbidden && can_enter(&walk.grid, cursor, dir))
        else {
            return Err((cursor, step));
        };

        let next = cursor.offset(dir);
        if distance == 0 {
            forbidden = Some(dir.reverse());
        }

        if let Some(cell) = walk.grid.get_mut(next) {
            cell.distance = distance + 1;
            cell.direction = Some(dir.reverse());
        }
        walk.bounds.include(next);

        if let Some(axis) = spawn_axis(&walk.grid, edges, next) {
            match axis {
                Axis::X => walk.locks.x = true,
                Axis::Y => walk.locks.y = true,
            }
            walk.grid.set_type(next, CellType::Spawn);
            walk.spawns.push(SpawnCell {
                location: next.offset(dir),
                direction: dir.reverse(),
            });
            return Ok(());
        }

        walk.grid.set_type(next, CellType::Path);
        cursor = next;
        last_dir = Some(dir);
    }

    Err((cursor, step_budget))
}

/// Candidate directions ordered by a random key per direction.
///
/// Keys are drawn in canonical order; the direction used last draws from a
/// wider range reaching lower values, so it sorts first more often. Ties keep
/// canonical order.
pub fn priority_order<R: Rng + ?Sized>(rng: &mut R, last_dir: Option<Direction>) -> [Direction; 4] {
    let mut keyed = Direction::ALL.map(|dir| {
        let low = if Some(dir) == last_dir { -5 } else { -3 };
        (rng.gen_range(low..4), dir)
    });
    keyed.sort_by_key(|&(key, _)| key);
    keyed.map(|(_, dir)| dir)
}

/// In bounds, unclaimed, and not touching any path cell other than `from`
fn can_enter(grid: &Grid, from: Position, dir: Direction) -> bool {
    let target = from.offset(dir);
    if grid.cell_type(target) != Some(CellType::Ground) {
        return false;
    }
    grid.neighbors4(target)
        .filter(|&(_, n)| n != from)
        .all(|(_, n)| grid.cell_type(n) != Some(CellType::Path))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Which axis, if any, turns `pos` into a spawn. The x axis is checked first.
fn spawn_axis(grid: &Grid, edges: BaseEdges, pos: Position) -> Option<Axis> {
    if on_open_edge(edges.x, pos.x, grid.width()) {
        Some(Axis::X)
    } else if on_open_edge(edges.y, pos.y, grid.height()) {
        Some(Axis::Y)
    } else {
        None
    }
}

fn on_open_edge(base_edge: Option<i32>, value: i32, len: i32) -> bool {
    base_edge != Some(value) && (value == 0 || value == len - 1)
}
