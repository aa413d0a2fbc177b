//! Host-facing table block
//!
//! Wraps a [`Grid`] with the state the host UI needs: which cell is focused,
//! and a listener that receives the re-serialized blob after every change.

use notegrid_core::{is_formula, CellRef, Grid, GridConfig, Result};
use notegrid_formula::{display_value, evaluate_grid};
use std::fmt;

type ChangeListener = Box<dyn FnMut(&str)>;

/// A formula-capable table embedded in a note
pub struct TableBlock {
    grid: Grid,
    config: GridConfig,
    focused: Option<CellRef>,
    listener: Option<ChangeListener>,
}

impl fmt::Debug for TableBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableBlock")
            .field("grid", &self.grid)
            .field("config", &self.config)
            .field("focused", &self.focused)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl TableBlock {
    /// Create a block holding an empty grid of the configured size
    pub fn new(config: GridConfig) -> Self {
        Self {
            grid: Grid::new(&config),
            config,
            focused: None,
            listener: None,
        }
    }

    /// Restore a block from the host's blob
    ///
    /// Malformed blobs yield an empty grid of the configured size.
    pub fn from_blob(text: &str, config: GridConfig) -> Self {
        Self {
            grid: Grid::from_json(text, &config),
            config,
            focused: None,
            listener: None,
        }
    }

    /// Register the listener called with the new blob after each change
    ///
    /// Replaces any previous listener.
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// The underlying grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Configuration the block was created with
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    /// Number of columns
    pub fn col_count(&self) -> usize {
        self.grid.col_count()
    }

    /// Serialize the grid
    pub fn to_blob(&self) -> Result<String> {
        self.grid.to_json()
    }

    /// Raw value of a cell, `None` outside the grid
    pub fn raw_value(&self, row: usize, col: usize) -> Option<&str> {
        self.grid.value(CellRef::new(row, col))
    }

    /// Whether the cell holds a formula
    pub fn is_formula(&self, row: usize, col: usize) -> bool {
        self.raw_value(row, col).is_some_and(is_formula)
    }

    /// Text to show for a cell
    ///
    /// The focused cell shows its raw text so it can be edited; every other
    /// cell shows its evaluated value. Outside the grid this is empty.
    pub fn display_value(&self, row: usize, col: usize) -> String {
        let cell = CellRef::new(row, col);
        match self.grid.value(cell) {
            None => String::new(),
            Some(raw) if self.focused == Some(cell) => raw.to_string(),
            Some(_) => display_value(&self.grid, cell),
        }
    }

    /// Display text for every cell, row-major
    pub fn display_grid(&self) -> Vec<Vec<String>> {
        let mut values = evaluate_grid(&self.grid);
        if let Some(cell) = self.focused {
            let raw = self.grid.value(cell);
            let slot = values.get_mut(cell.row).and_then(|row| row.get_mut(cell.col));
            if let (Some(slot), Some(raw)) = (slot, raw) {
                *slot = raw.to_string();
            }
        }
        values
    }

    /// Set a cell's raw value
    ///
    /// Fails for coordinates outside the grid. Writing the value a cell
    /// already holds is not a change.
    pub fn set_cell<S: Into<String>>(&mut self, row: usize, col: usize, value: S) -> Result<()> {
        let cell = CellRef::new(row, col);
        let value = value.into();
        if self.grid.value(cell) == Some(value.as_str()) {
            return Ok(());
        }
        self.grid.set_value(cell, value)?;
        self.notify();
        Ok(())
    }

    /// Mark a cell as being edited
    pub fn focus(&mut self, row: usize, col: usize) {
        self.focused = Some(CellRef::new(row, col));
    }

    /// Clear the focused cell
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The focused cell, if any
    pub fn focused(&self) -> Option<CellRef> {
        self.focused
    }

    /// Append an empty row at the bottom
    pub fn add_row(&mut self) {
        self.grid.add_row();
        self.notify();
    }

    /// Remove the bottom row; does nothing when one row remains
    pub fn remove_row(&mut self) -> bool {
        let removed = self.grid.remove_row();
        if removed {
            self.notify();
        }
        removed
    }

    /// Append an empty column on the right
    pub fn add_column(&mut self) {
        self.grid.add_column();
        self.notify();
    }

    /// Remove the rightmost column; does nothing when one column remains
    pub fn remove_column(&mut self) -> bool {
        let removed = self.grid.remove_column();
        if removed {
            self.notify();
        }
        removed
    }

    fn notify(&mut self) {
        let Some(listener) = self.listener.as_mut() else {
            return;
        };
        match self.grid.to_json() {
            Ok(blob) => listener(&blob),
            Err(e) => tracing::error!("failed to serialize grid: {e}"),
        }
    }
}

impl Default for TableBlock {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}
