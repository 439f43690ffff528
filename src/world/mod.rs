//! World module
//!
//! Grid model, level generation, flow field queries and tile selection.

pub mod cell;
pub mod grid;
pub mod flow;
pub mod autotile;
pub mod generation;

pub use cell::{Cell, CellType, Direction, Position};
pub use grid::Grid;
pub use flow::{flow_at, next_cell, trace_to_base};
pub use autotile::{classify, tile_for, Connections, TileVariant};
pub use generation::{Generator, Level, SpawnCell};
