//! Tile variant selection
//!
//! Path cells pick a straight, bend or junction piece from which orthogonal
//! neighbors belong to the path network. Ground and obstacle cells pick a
//! weighted random variant, which is purely cosmetic.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{CellType, Grid, Position};
use crate::error::TileError;

/// Visual tile for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileVariant {
    Vertical,
    Horizontal,
    /// Bend joining the top and left neighbors
    BendTopLeft,
    BendTopRight,
    BendBottomLeft,
    BendBottomRight,
    /// Three- or four-way piece
    Junction,
    Base,
    Ground(u8),
    Obstacle(u8),
}

impl TileVariant {
    pub fn glyph(&self) -> char {
        match self {
            TileVariant::Vertical => '│',
            TileVariant::Horizontal => '─',
            TileVariant::BendTopLeft => '┘',
            TileVariant::BendTopRight => '└',
            TileVariant::BendBottomLeft => '┐',
            TileVariant::BendBottomRight => '┌',
            TileVariant::Junction => '┼',
            TileVariant::Base => '◆',
            TileVariant::Ground(1) => '.',
            TileVariant::Ground(2) => ',',
            TileVariant::Ground(_) => '`',
            TileVariant::Obstacle(1) => '#',
            TileVariant::Obstacle(2) => '▓',
            TileVariant::Obstacle(_) => '♣',
        }
    }
}

/// Which orthogonal neighbors count as connected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connections {
    pub top: bool,
    pub left: bool,
    pub bottom: bool,
    pub right: bool,
}

impl Connections {
    pub const fn new(top: bool, left: bool, bottom: bool, right: bool) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn count(&self) -> usize {
        [self.top, self.left, self.bottom, self.right]
            .iter()
            .filter(|&&c| c)
            .count()
    }
}

impl fmt::Display for Connections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top={} left={} bottom={} right={}",
            self.top, self.left, self.bottom, self.right
        )
    }
}

/// The four literal grid corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Corner {
    fn of(grid: &Grid, pos: Position) -> Option<Corner> {
        let (right, top) = (grid.width() - 1, grid.height() - 1);
        match (pos.x, pos.y) {
            (0, 0) => Some(Corner::BottomLeft),
            (x, 0) if x == right => Some(Corner::BottomRight),
            (0, y) if y == top => Some(Corner::TopLeft),
            (x, y) if x == right && y == top => Some(Corner::TopRight),
            _ => None,
        }
    }
}

struct Rule {
    corner: Option<Corner>,
    pattern: Connections,
    tile: TileVariant,
}

const fn rule(corner: Option<Corner>, t: bool, l: bool, b: bool, r: bool, tile: TileVariant) -> Rule {
    Rule {
        corner,
        pattern: Connections::new(t, l, b, r),
        tile,
    }
}

const T: bool = true;
const F: bool = false;

/// Evaluated top to bottom; the first match wins.
///
/// At a literal corner a cul-de-sac reads as three connections, which must
/// still draw as a two-sided piece.
const RULES: [Rule; 14] = [
    rule(None, T, F, T, F, TileVariant::Vertical),
    rule(None, F, T, F, T, TileVariant::Horizontal),
    rule(None, T, T, F, F, TileVariant::BendTopLeft),
    rule(None, F, F, T, T, TileVariant::BendBottomRight),
    rule(None, F, T, T, F, TileVariant::BendBottomLeft),
    rule(None, T, F, F, T, TileVariant::BendTopRight),
    rule(Some(Corner::BottomLeft), T, T, T, F, TileVariant::Horizontal),
    rule(Some(Corner::BottomLeft), F, T, T, T, TileVariant::Vertical),
    rule(Some(Corner::BottomRight), T, F, T, T, TileVariant::Vertical),
    rule(Some(Corner::BottomRight), F, T, T, T, TileVariant::Horizontal),
    rule(Some(Corner::TopLeft), T, T, T, F, TileVariant::Vertical),
    rule(Some(Corner::TopLeft), T, T, F, T, TileVariant::Horizontal),
    rule(Some(Corner::TopRight), T, T, F, T, TileVariant::Horizontal),
    rule(Some(Corner::TopRight), T, F, T, T, TileVariant::Vertical),
];

/// Connectivity of a path cell.
///
/// A side facing off the map counts as connected only when the cell has at
/// most one in-bounds network neighbor, so edge dead-ends draw as capped paths.
pub fn connections(grid: &Grid, pos: Position) -> Connections {
    let edge_fallback = grid.count_network_neighbors(pos) <= 1;
    let side = |dx: i32, dy: i32| {
        let n = pos.translate(dx, dy);
        if grid.in_bounds(n) {
            grid.is_network(n)
        } else {
            edge_fallback
        }
    };
    Connections::new(side(0, 1), side(-1, 0), side(0, -1), side(1, 0))
}

/// Tile for a path or spawn cell
pub fn classify(grid: &Grid, pos: Position) -> Result<TileVariant, TileError> {
    match grid.cell_type(pos) {
        Some(CellType::Path | CellType::Spawn) => {}
        _ => return Err(TileError::NotAPathCell { position: pos }),
    }

    let pattern = connections(grid, pos);
    let corner = Corner::of(grid, pos);
    let matched = RULES
        .iter()
        .find(|r| r.pattern == pattern && (r.corner.is_none() || r.corner == corner));

    match matched {
        Some(r) => Ok(r.tile),
        None if pattern.count() >= 3 => Ok(TileVariant::Junction),
        None => Err(TileError::Unclassifiable {
            position: pos,
            pattern,
        }),
    }
}

/// Weighted cosmetic pick for ground and obstacle cells
pub fn decor<R: Rng + ?Sized>(cell_type: CellType, rng: &mut R) -> Option<TileVariant> {
    let roll = rng.gen_range(0..100);
    match cell_type {
        CellType::Ground => Some(TileVariant::Ground(match roll {
            0..=29 => 3,
            30..=59 => 2,
            _ => 1,
        })),
        CellType::Obstacle => Some(TileVariant::Obstacle(match roll {
            0..=49 => 1,
            50..=84 => 2,
            _ => 3,
        })),
        _ => None,
    }
}

/// Tile for any cell. Only ground and obstacle cells consume randomness.
pub fn tile_for<R: Rng + ?Sized>(grid: &Grid, pos: Position, rng: &mut R) -> Result<TileVariant, TileError> {
    match grid.cell_type(pos) {
        Some(CellType::Base) => Ok(TileVariant::Base),
        Some(kind @ (CellType::Ground | CellType::Obstacle)) => {
            decor(kind, rng).ok_or(TileError::NotAPathCell { position: pos })
        }
        _ => classify(grid, pos),
    }
}

/// Render the whole grid as tile glyphs, top row first
pub fn render_tiles<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Result<String, TileError> {
    let mut out = String::new();
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            out.push(tile_for(grid, Position::new(x, y), rng)?.glyph());
        }
        out.push('\n');
    }
    Ok(out)
}
