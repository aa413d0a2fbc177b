//! Grid type

use crate::cell::{Cell, CellRange, CellRef};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Options for constructing empty grids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Rows in a freshly inserted (or unrecoverable) grid (default: 3)
    pub default_rows: usize,
    /// Columns in a freshly inserted (or unrecoverable) grid (default: 3)
    pub default_cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_rows: 3,
            default_cols: 3,
        }
    }
}

/// A rectangular grid of cells
///
/// Every row has the same number of columns, and the grid is never smaller
/// than 1x1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create an empty grid of the configured default size
    pub fn new(config: &GridConfig) -> Self {
        Self::with_size(config.default_rows, config.default_cols)
    }

    /// Create an empty grid with the given dimensions (at least 1x1)
    pub fn with_size(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows: vec![vec![Cell::default(); cols]; rows],
        }
    }

    /// Build a grid from row-major raw values
    ///
    /// Short rows are padded with empty cells up to the widest row. An input
    /// with no cells at all yields a 1x1 empty grid.
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Vec<Cell>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|v| Cell::new(v)).collect())
            .collect();
        Self::from_cells(rows)
    }

    pub(crate) fn from_cells(mut rows: Vec<Vec<Cell>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Self::with_size(1, 1);
        }
        for row in &mut rows {
            row.resize_with(cols, Cell::default);
        }
        Self { rows }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Check whether a coordinate lies inside the grid
    pub fn contains(&self, cell: CellRef) -> bool {
        cell.row < self.row_count() && cell.col < self.col_count()
    }

    /// The part of a range that lies inside the grid
    ///
    /// `None` when the range and the grid share no cells.
    pub fn clip(&self, range: &CellRange) -> Option<CellRange> {
        let (rows, cols) = (self.row_count(), self.col_count());
        if rows == 0 || cols == 0 {
            return None;
        }
        let bounds = CellRange::new(CellRef::new(0, 0), CellRef::new(rows - 1, cols - 1));
        range.intersect(&bounds)
    }

    /// Get a cell
    pub fn cell(&self, cell: CellRef) -> Option<&Cell> {
        self.rows.get(cell.row)?.get(cell.col)
    }

    /// Get a cell's raw value
    pub fn value(&self, cell: CellRef) -> Option<&str> {
        self.cell(cell).map(|c| c.value.as_str())
    }

    /// Set a cell's raw value
    pub fn set_value<S: Into<String>>(&mut self, cell: CellRef, value: S) -> Result<()> {
        if !self.contains(cell) {
            return Err(Error::OutOfBounds {
                cell: cell.to_string(),
                rows: self.row_count(),
                cols: self.col_count(),
            });
        }
        self.rows[cell.row][cell.col].value = value.into();
        Ok(())
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Iterate over every coordinate, row-major
    pub fn coordinates(&self) -> impl Iterator<Item = CellRef> + '_ {
        let cols = self.col_count();
        (0..self.row_count()).flat_map(move |row| (0..cols).map(move |col| CellRef::new(row, col)))
    }

    /// Append an empty row at the bottom
    pub fn add_row(&mut self) {
        let cols = self.col_count();
        self.rows.push(vec![Cell::default(); cols]);
    }

    /// Remove the bottom row
    ///
    /// Returns `false` (and does nothing) when only one row remains.
    pub fn remove_row(&mut self) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        self.rows.pop();
        true
    }

    /// Append an empty column on the right
    pub fn add_column(&mut self) {
        for row in &mut self.rows {
            row.push(Cell::default());
        }
    }

    /// Remove the rightmost column
    ///
    /// Returns `false` (and does nothing) when only one column remains.
    pub fn remove_column(&mut self) -> bool {
        if self.col_count() <= 1 {
            return false;
        }
        for row in &mut self.rows {
            row.pop();
        }
        true
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn is_rectangular(grid: &Grid) -> bool {
        let cols = grid.col_count();
        grid.rows().iter().all(|row| row.len() == cols)
    }

    #[test]
    fn test_new_uses_config() {
        let grid = Grid::new(&GridConfig {
            default_rows: 4,
            default_cols: 2,
        });
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.col_count(), 2);
        assert!(grid.rows().iter().flatten().all(Cell::is_empty));
    }

    #[test]
    fn test_with_size_never_below_one() {
        let grid = Grid::with_size(0, 0);
        assert_eq!((grid.row_count(), grid.col_count()), (1, 1));
    }

    #[test]
    fn test_from_rows_pads_ragged_rows() {
        let grid = Grid::from_rows(vec![vec!["1"], vec!["2", "3", "4"]]);
        assert_eq!(grid.col_count(), 3);
        assert!(is_rectangular(&grid));
        assert_eq!(grid.value(CellRef::new(0, 2)), Some(""));
        assert_eq!(grid.value(CellRef::new(1, 2)), Some("4"));
    }

    #[test]
    fn test_set_value() {
        let mut grid = Grid::with_size(2, 2);
        grid.set_value(CellRef::new(1, 1), "=A1").unwrap();
        assert_eq!(grid.value(CellRef::new(1, 1)), Some("=A1"));
        assert!(grid.set_value(CellRef::new(2, 0), "x").is_err());
        assert!(grid.set_value(CellRef::new(0, 2), "x").is_err());
        assert!(grid.contains(CellRef::new(1, 0)));
        assert!(!grid.contains(CellRef::new(0, 2)));
        assert_eq!(grid.value(CellRef::new(5, 5)), None);
    }

    #[test]
    fn test_structural_ops() {
        let mut grid = Grid::with_size(1, 1);
        assert!(!grid.remove_row());
        assert!(!grid.remove_column());

        grid.add_row();
        grid.add_column();
        assert_eq!((grid.row_count(), grid.col_count()), (2, 2));

        grid.set_value(CellRef::new(1, 1), "x").unwrap();
        assert!(grid.remove_row());
        assert_eq!(grid.value(CellRef::new(1, 1)), None);
        assert!(grid.remove_column());
        assert_eq!((grid.row_count(), grid.col_count()), (1, 1));
    }

    #[test]
    fn test_clip_to_grid() {
        let grid = Grid::with_size(1, 2);
        let whole = CellRange::parse("A1:XFD1048576").unwrap();
        assert_eq!(grid.clip(&whole), CellRange::parse("A1:B1"));
        assert_eq!(
            grid.clip(&CellRange::parse("B1:C9").unwrap()),
            CellRange::parse("B1:B1")
        );
        assert_eq!(grid.clip(&CellRange::parse("B2:XFD1048576").unwrap()), None);
        assert_eq!(grid.clip(&CellRange::parse("C1:D1").unwrap()), None);
    }

    #[test]
    fn test_coordinates_are_row_major() {
        let grid = Grid::with_size(2, 2);
        let cells: Vec<_> = grid.coordinates().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);
    }

    proptest! {
        #[test]
        fn structural_ops_keep_grid_rectangular(ops in proptest::collection::vec(0u8..4, 0..64)) {
            let mut grid = Grid::with_size(2, 3);
            for op in ops {
                match op {
                    0 => grid.add_row(),
                    1 => { grid.remove_row(); }
                    2 => grid.add_column(),
                    _ => { grid.remove_column(); }
                }
                prop_assert!(is_rectangular(&grid));
                prop_assert!(grid.row_count() >= 1);
                prop_assert!(grid.col_count() >= 1);
            }
        }
    }
}
