//! Prelude module - common imports for notegrid users
//!
//! ```rust
//! use notegrid::prelude::*;
//! ```

pub use crate::{
    // Cell types
    Cell,
    CellError,
    CellRange,
    CellRef,
    // Error types
    Error,
    // Evaluation
    FormulaValue,
    // Grid types
    Grid,
    GridConfig,
    Result,
    // Host surface
    TableBlock,
};
