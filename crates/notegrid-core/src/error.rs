//! Error types for notegrid-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notegrid-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Cell coordinate outside the grid
    #[error("Cell {cell} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        cell: String,
        rows: usize,
        cols: usize,
    },

    /// Blob could not be encoded
    #[error("Failed to encode grid: {0}")]
    Encode(#[from] serde_json::Error),
}
