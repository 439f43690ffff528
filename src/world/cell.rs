//! Cell definitions
//!
//! Grid coordinates, axis directions and the per-cell generation state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position on the level grid. `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring position one step in `dir`
    pub fn offset(&self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Shift by an arbitrary vector (used when re-framing a level)
    pub fn translate(&self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another position
    pub fn manhattan(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four axis directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Canonical enumeration order. Random priority keys are drawn in this order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, -1),
            Direction::Right => (1, 0),
        }
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Right => Direction::Left,
        }
    }
}

/// What occupies a grid cell. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Ground,
    Path,
    Base,
    Spawn,
    Obstacle,
}

impl CellType {
    /// Path, base and spawn cells form the connected network enemies walk on
    pub fn is_network(&self) -> bool {
        matches!(self, CellType::Path | CellType::Base | CellType::Spawn)
    }

    pub fn glyph(&self) -> char {
        match self {
            CellType::Ground => '.',
            CellType::Path => '+',
            CellType::Base => 'B',
            CellType::Spawn => 'S',
            CellType::Obstacle => '#',
        }
    }
}

/// A single cell of the level grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,
    /// Steps from the base along the strand that first reached this cell
    pub distance: u32,
    /// Flow direction pointing back toward the base (path and spawn cells only)
    pub direction: Option<Direction>,
    /// Structure placed on this cell by the placement layer
    pub occupant: Option<u32>,
}

impl Cell {
    pub fn new(cell_type: CellType) -> Self {
        Self {
            cell_type,
            ..Self::default()
        }
    }

    pub fn is_ground(&self) -> bool {
        self.cell_type == CellType::Ground
    }

    /// Free for tower placement
    pub fn is_free(&self) -> bool {
        self.is_ground() && self.occupant.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_roundtrip() {
        for dir in Direction::ALL {
            assert_eq!(dir.reverse().reverse(), dir);
            let (dx, dy) = dir.delta();
            let (rx, ry) = dir.reverse().delta();
            assert_eq!((dx + rx, dy + ry), (0, 0));
        }
    }

    #[test]
    fn test_offset_is_unit_step() {
        let origin = Position::new(3, 3);
        for dir in Direction::ALL {
            assert_eq!(origin.manhattan(&origin.offset(dir)), 1);
        }
        assert_eq!(origin.offset(Direction::Up), Position::new(3, 4));
    }

    #[test]
    fn test_network_membership() {
        assert!(CellType::Path.is_network());
        assert!(CellType::Base.is_network());
        assert!(CellType::Spawn.is_network());
        assert!(!CellType::Ground.is_network());
        assert!(!CellType::Obstacle.is_network());
    }

    #[test]
    fn test_free_cell() {
        let mut cell = Cell::default();
        assert!(cell.is_free());
        cell.occupant = Some(7);
        assert!(!cell.is_free());
        assert!(!Cell::new(CellType::Obstacle).is_free());
    }
}
