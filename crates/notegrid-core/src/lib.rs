//! # notegrid-core
//!
//! Core data structures for the notegrid table block.
//!
//! This crate provides the fundamental types used throughout notegrid:
//! - [`Cell`] - A single raw cell value (literal or `=` formula)
//! - [`CellRef`] and [`CellRange`] - A1-style addressing and ranges
//! - [`CellError`] - The closed set of evaluation error sentinels
//! - [`Grid`] - The rectangular grid owned by a note, and its JSON blob form
//!
//! ## Example
//!
//! ```rust
//! use notegrid_core::{CellRef, Grid, GridConfig};
//!
//! let mut grid = Grid::new(&GridConfig::default());
//! grid.set_value(CellRef::new(0, 0), "42").unwrap();
//! grid.set_value(CellRef::parse("B1").unwrap(), "=A1*2").unwrap();
//!
//! let blob = grid.to_json().unwrap();
//! let restored = Grid::from_json(&blob, &GridConfig::default());
//! assert_eq!(restored, grid);
//! ```

pub mod blob;
pub mod cell;
pub mod error;
pub mod grid;

// Re-exports for convenience
pub use blob::GridBlob;
pub use cell::{column_to_letters, letters_to_column, Cell, CellError, CellRange, CellRef};
pub use error::{Error, Result};
pub use grid::{Grid, GridConfig};

/// Leading character that turns a cell's raw value into a formula
pub const FORMULA_MARKER: char = '=';

/// Returns true if the raw cell text is a formula
pub fn is_formula(raw: &str) -> bool {
    raw.starts_with(FORMULA_MARKER)
}
