//! Grid data structure
//!
//! The fixed-size 2D cell array a level is built on.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellType, Direction, Position};
use crate::error::GridError;

/// A level grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot")]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

/// Unchecked wire form of [`Grid`]
#[derive(Deserialize)]
struct GridSnapshot {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GridError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        let GridSnapshot { width, height, cells } = snapshot;
        if width <= 0 || height <= 0 {
            return Err(GridError::Dimensions { width, height });
        }
        if cells.len() != (width as usize) * (height as usize) {
            return Err(GridError::CellCount {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }
}

impl Grid {
    /// Create a new grid filled with ground
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Center cell; dimensions are odd so it is unique
    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    fn idx_to_pos(&self, idx: usize) -> Position {
        let idx = idx as i32;
        Position::new(idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if self.in_bounds(pos) {
            Some(&self.cells[self.xy_to_idx(pos.x, pos.y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if self.in_bounds(pos) {
            let idx = self.xy_to_idx(pos.x, pos.y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Cell type at position, `None` outside the grid
    pub fn cell_type(&self, pos: Position) -> Option<CellType> {
        self.get(pos).map(|c| c.cell_type)
    }

    /// Set cell type at position. Out-of-bounds writes are ignored.
    pub fn set_type(&mut self, pos: Position, cell_type: CellType) {
        if let Some(cell) = self.get_mut(pos) {
            cell.cell_type = cell_type;
        }
    }

    /// Overwrite a whole cell. Returns false if `pos` is outside the grid.
    pub fn put(&mut self, pos: Position, cell: Cell) -> bool {
        match self.get_mut(pos) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_network(&self, pos: Position) -> bool {
        self.cell_type(pos).map_or(false, |t| t.is_network())
    }

    /// Ground cell with nothing placed on it
    pub fn is_free(&self, pos: Position) -> bool {
        self.get(pos).map_or(false, |c| c.is_free())
    }

    /// Claim a free ground cell for a placed structure
    pub fn set_occupant(&mut self, pos: Position, occupant: u32) -> bool {
        match self.get_mut(pos) {
            Some(cell) if cell.is_free() => {
                cell.occupant = Some(occupant);
                true
            }
            _ => false,
        }
    }

    /// In-bounds orthogonal neighbors with the direction leading to each
    pub fn neighbors4(&self, pos: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |dir| (dir, pos.offset(dir)))
            .filter(move |(_, n)| self.in_bounds(*n))
    }

    /// Number of in-bounds orthogonal neighbors that belong to the path network
    pub fn count_network_neighbors(&self, pos: Position) -> usize {
        self.neighbors4(pos).filter(|(_, n)| self.is_network(*n)).count()
    }

    /// True if `pos` lies on the outermost row or column
    pub fn is_boundary(&self, pos: Position) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |idx| self.idx_to_pos(idx))
    }

    /// All cells paired with their position
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells.iter().enumerate().map(move |(idx, cell)| (self.idx_to_pos(idx), cell))
    }

    /// Positions of every cell of the given type
    pub fn positions_of(&self, cell_type: CellType) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.cell_type == cell_type)
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn count(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|c| c.cell_type == cell_type).count()
    }

    /// Plain one-glyph-per-cell dump, top row first
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                let glyph = self.cell_type(Position::new(x, y)).map_or(' ', |t| t.glyph());
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_round_trip() {
        let mut grid = Grid::new(3, 5);
        grid.set_type(Position::new(1, 2), CellType::Base);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }

    #[test]
    fn test_snapshot_cell_count_checked() {
        let grid = Grid::new(3, 3);
        let mut value = serde_json::to_value(&grid).unwrap();
        value["cells"].as_array_mut().unwrap().truncate(4);
        let result: Result<Grid, _> = serde_json::from_value(value);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("holds 4 cells"), "{}", err);

        let result: Result<Grid, _> =
            serde_json::from_str(r#"{"width":-3,"height":3,"cells":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_grid_is_ground() {
        let grid = Grid::new(5, 3);
        assert_eq!(grid.count(CellType::Ground), 15);
        assert_eq!(grid.center(), Position::new(2, 1));
    }

    #[test]
    fn test_bounds() {
        let mut grid = Grid::new(5, 5);
        assert!(grid.get(Position::new(-1, 0)).is_none());
        assert!(grid.get(Position::new(0, 5)).is_none());
        assert!(!grid.put(Position::new(5, 0), Cell::new(CellType::Path)));
        grid.set_type(Position::new(7, 7), CellType::Path);
        assert_eq!(grid.count(CellType::Path), 0);
    }

    #[test]
    fn test_positions_row_major() {
        let grid = Grid::new(3, 2);
        let all: Vec<Position> = grid.positions().collect();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[3], Position::new(0, 1));
        assert_eq!(all[5], Position::new(2, 1));
    }

    #[test]
    fn test_neighbors_clip_at_edges() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.neighbors4(Position::new(0, 0)).count(), 2);
        assert_eq!(grid.neighbors4(Position::new(0, 2)).count(), 3);
        assert_eq!(grid.neighbors4(Position::new(2, 2)).count(), 4);
    }

    #[test]
    fn test_network_neighbors() {
        let mut grid = Grid::new(5, 5);
        grid.set_type(Position::new(2, 3), CellType::Path);
        grid.set_type(Position::new(1, 2), CellType::Base);
        grid.set_type(Position::new(3, 2), CellType::Obstacle);
        assert_eq!(grid.count_network_neighbors(Position::new(2, 2)), 2);
    }

    #[test]
    fn test_occupant_only_on_free_ground() {
        let mut grid = Grid::new(3, 3);
        let pos = Position::new(1, 1);
        assert!(grid.set_occupant(pos, 1));
        assert!(!grid.set_occupant(pos, 2));
        assert!(!grid.is_free(pos));

        grid.set_type(Position::new(0, 0), CellType::Path);
        assert!(!grid.set_occupant(Position::new(0, 0), 3));
    }

    #[test]
    fn test_ascii_top_row_first() {
        let mut grid = Grid::new(3, 2);
        grid.set_type(Position::new(0, 1), CellType::Base);
        assert_eq!(grid.to_ascii(), "B..\n...\n");
    }
}
