//! Spatial-subsystem error type.

use thiserror::Error;

use sf_core::Cell;

/// Errors produced by `sf-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Start and goal are disconnected under the current occupancy.  A normal
    /// simulation outcome, not a fault.
    #[error("no path from {from} to {to}")]
    NoPath { from: Cell, to: Cell },

    #[error("cell {cell} is outside the {width}x{height} floor")]
    OutOfBounds { cell: Cell, width: u32, height: u32 },

    #[error("invalid layout: {0}")]
    Layout(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpatialError {
    /// `true` for the outcomes an agent treats as "no way there".
    pub fn is_unreachable(&self) -> bool {
        matches!(self, SpatialError::NoPath { .. } | SpatialError::OutOfBounds { .. })
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;
