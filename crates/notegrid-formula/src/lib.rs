//! # notegrid-formula
//!
//! Formula evaluator for notegrid.
//!
//! This crate provides:
//! - Formula dispatch (function call, bare reference, simple arithmetic, number)
//! - Value coercion between raw cell text, numbers and display strings
//! - Argument extraction over references, ranges and literals
//! - Built-in functions (~45) across math, logical, text, lookup, date and info
//!
//! Evaluation is pull-based and uncached: every request re-evaluates the
//! referenced cells against the grid it is given.
//!
//! ## Example
//!
//! ```rust
//! use notegrid_core::{CellRef, Grid};
//! use notegrid_formula::display_value;
//!
//! let grid = Grid::from_rows(vec![vec!["1", "=SUM(A1:A3)"], vec!["2", ""], vec!["3", ""]]);
//! assert_eq!(display_value(&grid, CellRef::new(0, 1)), "6");
//! ```

pub mod args;
pub mod coerce;
pub mod error;
pub mod evaluator;
pub mod functions;

pub use coerce::{format_number, parse_number, to_display_string, to_number};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{
    display_value, evaluate_cell, evaluate_formula, evaluate_grid, function_registry,
    EvaluationContext, FormulaValue, Visited,
};
pub use functions::{FunctionDef, FunctionImpl, FunctionRegistry};
