//! # notegrid
//!
//! A small spreadsheet-like table block for a note-taking app.
//!
//! Cells hold raw text. A value starting with `=` is a formula that can
//! reference other cells (`A1`), ranges (`A1:B3`) and built-in functions.
//! The host keeps the grid as a JSON blob and asks the [`TableBlock`] for
//! display values.
//!
//! ## Example
//!
//! ```rust
//! use notegrid::prelude::*;
//!
//! let mut table = TableBlock::new(GridConfig::default());
//!
//! table.set_cell(0, 0, "10").unwrap();
//! table.set_cell(1, 0, "32").unwrap();
//! table.set_cell(2, 0, "=SUM(A1:A2)").unwrap();
//! assert_eq!(table.display_value(2, 0), "42");
//!
//! // The focused cell shows its formula
//! table.focus(2, 0);
//! assert_eq!(table.display_value(2, 0), "=SUM(A1:A2)");
//!
//! let blob = table.to_blob().unwrap();
//! let restored = TableBlock::from_blob(&blob, GridConfig::default());
//! assert_eq!(restored.display_value(2, 0), "42");
//! ```

pub mod prelude;
pub mod table;

pub use table::TableBlock;

// Re-export core types
pub use notegrid_core::{
    column_to_letters, is_formula, letters_to_column, Cell, CellError, CellRange, CellRef, Error,
    Grid, GridBlob, GridConfig, Result, FORMULA_MARKER,
};

// Re-export formula types
pub use notegrid_formula::{
    display_value, evaluate_cell, evaluate_grid, format_number, to_display_string,
    EvaluationContext, FormulaValue,
};
