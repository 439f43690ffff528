//! Deadpath - procedural tower-defense levels
//!
//! Grows randomized, self-avoiding paths from a base to the map edges, bakes a
//! flow field that leads every enemy home, then scatters noise-driven obstacles.

pub mod config;
pub mod error;
pub mod world;

// Re-export commonly used types
pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerationError, GridError, TileError};
pub use world::{Cell, CellType, Direction, Generator, Grid, Level, Position, SpawnCell, TileVariant};
