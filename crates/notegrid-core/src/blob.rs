//! Serialized grid form
//!
//! The host note stores the grid as an opaque JSON blob:
//!
//! ```json
//! { "data": [[{ "value": "1" }, { "value": "=A1*2" }]] }
//! ```
//!
//! Decoding never fails. Anything that cannot be turned into a grid falls back
//! to an empty grid of the configured default size.

use crate::cell::Cell;
use crate::error::Result;
use crate::grid::{Grid, GridConfig};
use serde::{Deserialize, Serialize};

/// On-disk shape of a grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridBlob {
    /// Row-major cells
    pub data: Vec<Vec<Cell>>,
}

impl From<&Grid> for GridBlob {
    fn from(grid: &Grid) -> Self {
        Self {
            data: grid.rows().to_vec(),
        }
    }
}

impl GridBlob {
    /// Reconstruct a grid, or `None` if the blob holds no cells
    pub fn into_grid(self) -> Option<Grid> {
        let has_cells = self.data.iter().any(|row| !row.is_empty());
        has_cells.then(|| Grid::from_cells(self.data))
    }
}

impl Grid {
    /// Decode a grid from its JSON blob
    ///
    /// Malformed or empty input yields `Grid::new(config)`. Ragged rows are
    /// padded to the widest row.
    pub fn from_json(text: &str, config: &GridConfig) -> Self {
        match serde_json::from_str::<GridBlob>(text) {
            Ok(blob) => blob.into_grid().unwrap_or_else(|| {
                tracing::warn!("grid blob has no cells, using default grid");
                Grid::new(config)
            }),
            Err(e) => {
                tracing::warn!("malformed grid blob, using default grid: {e}");
                Grid::new(config)
            }
        }
    }

    /// Encode the grid as its JSON blob
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&GridBlob::from(self))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellRef;
    use pretty_assertions::assert_eq;

    fn config() -> GridConfig {
        GridConfig {
            default_rows: 2,
            default_cols: 4,
        }
    }

    #[test]
    fn test_round_trip() {
        let grid = Grid::from_rows(vec![vec!["1", "=A1+1"], vec!["text", ""]]);
        let json = grid.to_json().unwrap();
        assert_eq!(Grid::from_json(&json, &config()), grid);
    }

    #[test]
    fn test_canonical_shape() {
        let grid = Grid::from_rows(vec![vec!["a"]]);
        assert_eq!(grid.to_json().unwrap(), r#"{"data":[[{"value":"a"}]]}"#);
    }

    #[test]
    fn test_malformed_falls_back_to_default() {
        let expected = Grid::new(&config());
        for text in [
            "",
            "not json",
            "{}",
            r#"{"data": 5}"#,
            r#"{"data": []}"#,
            r#"{"data": [[], []]}"#,
            r#"{"data": [[{"value": 3}]]}"#,
            "null",
        ] {
            assert_eq!(Grid::from_json(text, &config()), expected, "input: {text}");
        }
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let grid = Grid::from_json(
            r#"{"data": [[{"value": "1"}], [{"value": "2"}, {"value": "3"}]]}"#,
            &config(),
        );
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.col_count(), 2);
        assert_eq!(grid.value(CellRef::new(0, 1)), Some(""));
    }

    #[test]
    fn test_missing_value_and_extra_keys() {
        let grid = Grid::from_json(
            r#"{"data": [[{}, {"value": "x", "style": "bold"}]], "version": 2}"#,
            &config(),
        );
        assert_eq!(grid.value(CellRef::new(0, 0)), Some(""));
        assert_eq!(grid.value(CellRef::new(0, 1)), Some("x"));
    }
}
