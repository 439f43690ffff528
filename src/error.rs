//! Error types
//!
//! Deadlocks never surface here; they are retried inside the generator.

use std::path::PathBuf;

use thiserror::Error;

use crate::world::{Connections, Position};

/// Errors returned by the level generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Grid dimensions must be odd and at least 3x3
    #[error("invalid grid dimensions {width}x{height}: both must be odd and at least 3")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("at least one strand is required")]
    NoStrands,

    #[error("base position {base} lies outside the {width}x{height} grid")]
    BaseOutOfBounds { base: Position, width: i32, height: i32 },

    /// Every attempt deadlocked
    #[error("level generation failed after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Errors raised while choosing tile variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    /// The neighbor pattern cannot come out of a valid path network
    #[error("unclassifiable path pattern at {position}: {pattern}")]
    Unclassifiable {
        position: Position,
        pattern: Connections,
    },

    #[error("cell {position} is not a path or spawn cell")]
    NotAPathCell { position: Position },
}

/// A grid snapshot whose cell data does not match its dimensions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} must be positive")]
    Dimensions { width: i32, height: i32 },

    #[error("grid of {width}x{height} holds {cells} cells")]
    CellCount { width: i32, height: i32, cells: usize },
}

/// Errors raised while loading generator configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(#[from] GenerationError),

    #[error("obstacle threshold {0} must lie in (-1, 1)")]
    Threshold(f64),

    #[error("{0} must be greater than zero")]
    ZeroBudget(&'static str),
}
