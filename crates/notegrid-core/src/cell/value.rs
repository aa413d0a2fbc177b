//! Cell value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single grid cell
///
/// The raw value is the only persisted state: either a literal or a formula
/// starting with [`FORMULA_MARKER`](crate::FORMULA_MARKER).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Raw text as typed by the user
    #[serde(default)]
    pub value: String,
}

impl Cell {
    /// Create a cell holding the given raw text
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Check if the cell has no raw text
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        crate::is_formula(&self.value)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::new(s)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::new(s)
    }
}

/// Formula error sentinels
///
/// Rendered in place of a value; never raised across the evaluator boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    /// #ERROR! - A function implementation failed
    Error,
    /// #NAME? - Unrecognized function name
    Name,
    /// #REF! - Circular reference
    Ref,
    /// #VALUE! - Unrecognized formula form
    Value,
    /// #DIV/0! - Division by zero
    Div0,
}

impl CellError {
    /// Get the display string for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Error => "#ERROR!",
            CellError::Name => "#NAME?",
            CellError::Ref => "#REF!",
            CellError::Value => "#VALUE!",
            CellError::Div0 => "#DIV/0!",
        }
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
