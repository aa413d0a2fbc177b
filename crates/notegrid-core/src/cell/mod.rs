//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Cell`] - The raw value stored in a grid position
//! - [`CellRef`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`CellError`] - Evaluation error sentinels

mod address;
mod value;

pub use address::{column_to_letters, letters_to_column, CellRange, CellRangeIterator, CellRef};
pub use value::{Cell, CellError};
