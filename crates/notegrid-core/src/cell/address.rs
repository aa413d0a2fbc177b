//! Cell address and range types

use crate::error::{Error, Result};
use lazy_regex::regex_captures;
use std::fmt;
use std::str::FromStr;

/// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
///
/// Letters are a bijective base-26 numeral: there is no zero digit, so `Z`
/// is 26 and `AA` is 27 before the shift to a zero-based index.
pub fn letters_to_column(letters: &str) -> Result<usize> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(|| Error::InvalidAddress(format!("column '{}' too large", letters)))?;
    }

    // Convert to 0-based
    Ok(col - 1)
}

/// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(col: usize) -> String {
    let mut result = Vec::new();
    // 1-based for calculation; u128 keeps usize::MAX + 1 representable
    let mut n = col as u128 + 1;

    while n > 0 {
        n -= 1;
        result.push((n % 26) as u8 + b'A');
        n /= 26;
    }

    result.reverse();
    // Only ASCII uppercase letters were pushed
    result.into_iter().map(char::from).collect()
}

/// A cell coordinate (e.g., "A1")
///
/// Both indices are 0-based; the A1 form is 1-based on rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    /// Row index (0-based internally, 1-based in display)
    pub row: usize,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: usize,
}

impl CellRef {
    /// Create a new cell reference
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse a cell reference from A1-style notation
    ///
    /// Returns `None` rather than an error for text that is not a reference,
    /// so callers can use it to tell references from literals.
    ///
    /// # Examples
    /// ```
    /// use notegrid_core::CellRef;
    ///
    /// assert_eq!(CellRef::parse("A1"), Some(CellRef::new(0, 0)));
    /// assert_eq!(CellRef::parse("b3"), Some(CellRef::new(2, 1)));
    /// assert_eq!(CellRef::parse("1A"), None);
    /// assert_eq!(CellRef::parse("A"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let (_, letters, digits) = regex_captures!(r"^([A-Za-z]+)([0-9]+)$", s.trim())?;

        let col = letters_to_column(letters).ok()?;
        let row: usize = digits.parse().ok()?;

        // Rows are 1-based in A1 notation
        let row = row.checked_sub(1)?;

        Some(Self { row, col })
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidAddress(s.to_string()))
    }
}

/// A range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start reference (top-left)
    pub start: CellRef,
    /// End reference (bottom-right)
    pub end: CellRef,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellRef, end: CellRef) -> Self {
        // Normalize so start is top-left and end is bottom-right
        Self {
            start: CellRef::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellRef::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Parse a range from A1:B10 notation
    ///
    /// Returns `None` if either endpoint is not a valid reference.
    pub fn parse(s: &str) -> Option<Self> {
        let (start, end) = s.split_once(':')?;
        Some(Self::new(CellRef::parse(start)?, CellRef::parse(end)?))
    }

    /// The cells this range shares with another, if any
    pub fn intersect(&self, other: &CellRange) -> Option<CellRange> {
        let start = CellRef::new(
            self.start.row.max(other.start.row),
            self.start.col.max(other.start.col),
        );
        let end = CellRef::new(
            self.end.row.min(other.end.row),
            self.end.col.min(other.end.col),
        );
        if start.row > end.row || start.col > end.col {
            return None;
        }
        Some(CellRange { start, end })
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    /// Iterate over all cell references in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
        }
    }

    /// Format as A1:B10 string
    pub fn to_a1_string(&self) -> String {
        format!("{}:{}", self.start, self.end)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidAddress(s.to_string()))
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: usize,
    current_col: usize,
}

impl Iterator for CellRangeIterator {
    type Item = CellRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row > self.range.end.row {
            return None;
        }

        let cell = CellRef::new(self.current_row, self.current_col);

        self.current_col += 1;
        if self.current_col > self.range.end.col {
            self.current_col = self.range.start.col;
            self.current_row += 1;
        }

        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(1), "B");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(27), "AB");
        assert_eq!(column_to_letters(51), "AZ");
        assert_eq!(column_to_letters(52), "BA");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 0);
        assert_eq!(letters_to_column("Z").unwrap(), 25);
        assert_eq!(letters_to_column("AA").unwrap(), 26);
        assert_eq!(letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(letters_to_column("AAA").unwrap(), 702);

        // Case insensitive
        assert_eq!(letters_to_column("a").unwrap(), 0);
        assert_eq!(letters_to_column("aa").unwrap(), 26);

        assert!(letters_to_column("").is_err());
        assert!(letters_to_column("A1").is_err());
        assert!(letters_to_column(&"Z".repeat(40)).is_err());
    }

    proptest! {
        #[test]
        fn column_codec_round_trips(n in 0usize..10_000) {
            prop_assert_eq!(letters_to_column(&column_to_letters(n)).unwrap(), n);
        }
    }

    #[test]
    fn test_cell_ref_parse() {
        assert_eq!(CellRef::parse("A1"), Some(CellRef::new(0, 0)));
        assert_eq!(CellRef::parse("B3"), Some(CellRef::new(2, 1)));
        assert_eq!(CellRef::parse("aa10"), Some(CellRef::new(9, 26)));
        assert_eq!(CellRef::parse(" C2 "), Some(CellRef::new(1, 2)));
    }

    #[test]
    fn test_cell_ref_parse_rejects() {
        assert_eq!(CellRef::parse("1A"), None);
        assert_eq!(CellRef::parse("A"), None);
        assert_eq!(CellRef::parse("1"), None);
        assert_eq!(CellRef::parse(""), None);
        assert_eq!(CellRef::parse("A0"), None);
        assert_eq!(CellRef::parse("A1B"), None);
        assert_eq!(CellRef::parse("$A$1"), None);
        assert!("A1:B2".parse::<CellRef>().is_err());
    }

    #[test]
    fn test_cell_ref_display() {
        assert_eq!(CellRef::new(0, 0).to_string(), "A1");
        assert_eq!(CellRef::new(99, 2).to_string(), "C100");
        assert_eq!(CellRef::new(0, 26).to_string(), "AA1");
    }

    #[test]
    fn test_cell_range_parse() {
        let range = CellRange::parse("A1:B2").unwrap();
        assert_eq!(range.start, CellRef::new(0, 0));
        assert_eq!(range.end, CellRef::new(1, 1));

        // Reversed endpoints normalize
        let range = CellRange::parse("B3:A1").unwrap();
        assert_eq!(range.start, CellRef::new(0, 0));
        assert_eq!(range.end, CellRef::new(2, 1));

        assert_eq!(CellRange::parse("A1"), None);
        assert_eq!(CellRange::parse("A1:"), None);
        assert_eq!(CellRange::parse("X:B2"), None);
    }

    #[test]
    fn test_cell_range_iterator_is_row_major() {
        let range = CellRange::parse("A1:B2").unwrap();
        let cells: Vec<_> = range.cells().collect();

        assert_eq!(
            cells,
            vec![
                CellRef::new(0, 0), // A1
                CellRef::new(0, 1), // B1
                CellRef::new(1, 0), // A2
                CellRef::new(1, 1), // B2
            ]
        );
        assert_eq!(range.row_count(), 2);
        assert_eq!(range.col_count(), 2);
    }

    #[test]
    fn test_cell_range_intersect() {
        let range = CellRange::parse("B2:D4").unwrap();
        assert_eq!(
            range.intersect(&CellRange::parse("A1:C3").unwrap()),
            CellRange::parse("B2:C3")
        );
        assert_eq!(
            range.intersect(&CellRange::parse("C3:XFD1048576").unwrap()),
            CellRange::parse("C3:D4")
        );
        assert_eq!(range.intersect(&range), Some(range));
        assert_eq!(range.intersect(&CellRange::parse("E1:F9").unwrap()), None);
        assert_eq!(range.intersect(&CellRange::parse("A5:D5").unwrap()), None);
    }
}
