//! Error types for grid edits and configuration.

use thiserror::Error;

use crate::geom::Coord;

/// Errors raised by [`Grid`](crate::Grid) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("{pos} is outside the grid")]
    OutOfBounds { pos: Coord },

    /// The edit would break a cell invariant (wall on an endpoint, endpoint
    /// on a wall, a second start or end).
    #[error("edit rejected at {pos}: {reason}")]
    Rejected { pos: Coord, reason: &'static str },

    #[error("set start and end first")]
    NotReady,
}

/// Errors raised by [`Config::validate`](crate::Config::validate).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("wall density must be within [0, 1] (got {0})")]
    WallDensity(f64),

    #[error("cell width must be at least one column")]
    CellWidth,
}
