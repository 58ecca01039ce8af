//! Display grid
//!
//! Row 0 is the header (field names); rows 1..N hold record values aligned
//! to the header by column position. Every row has the header's width.

use crate::cell::Cell;
use crate::error::GridError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One grid row
pub type Row = Vec<Cell>;

/// Header plus value rows
///
/// Once built, a grid is never patched; a refresh produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Row>", try_from = "Vec<Row>")]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// Build from a header and value rows
    ///
    /// # Errors
    /// `GridError::WidthMismatch` if any row's width differs from the header's
    pub fn new<S: Into<String>>(header: Vec<S>, rows: Vec<Row>) -> Result<Self, GridError> {
        let header: Row = header.into_iter().map(|name| Cell::Text(name.into())).collect();
        let mut all = Vec::with_capacity(rows.len() + 1);
        all.push(header);
        all.extend(rows);
        Self::from_rows(all)
    }

    /// Build from rows where row 0 is the header
    ///
    /// # Errors
    /// - `GridError::MissingHeader` if `rows` is empty
    /// - `GridError::WidthMismatch` if any row's width differs from the header's
    pub fn from_rows(rows: Vec<Row>) -> Result<Self, GridError> {
        let expected = rows.first().ok_or(GridError::MissingHeader)?.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, width)| *width != expected)
        {
            return Err(GridError::WidthMismatch {
                row,
                expected,
                found,
            });
        }
        Ok(Self { rows })
    }

    /// Rows produced by the normalizer already match the header width
    pub(crate) fn assemble(header: Vec<String>, rows: Vec<Row>) -> Self {
        let width = header.len();
        debug_assert!(rows.iter().all(|row| row.len() == width));

        let mut all = Vec::with_capacity(rows.len() + 1);
        all.push(header.into_iter().map(Cell::Text).collect());
        all.extend(rows);
        Self { rows: all }
    }

    /// Header row
    #[inline]
    #[must_use]
    pub fn header(&self) -> &[Cell] {
        &self.rows[0]
    }

    /// Header field names
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.header()
            .iter()
            .map(|cell| cell.display_text().into_owned())
            .collect()
    }

    /// All rows, header first
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows after the header
    #[inline]
    #[must_use]
    pub fn data_rows(&self) -> &[Row] {
        &self.rows[1..]
    }

    /// Row at `index` (0 is the header)
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Total rows including the header; never zero
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows after the header
    #[inline]
    #[must_use]
    pub fn data_row_count(&self) -> usize {
        self.rows.len() - 1
    }

    /// Column count
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// At least one data row
    #[inline]
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.rows.len() > 1
    }

    /// The grid as a JSON array of arrays
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| Value::Array(row.iter().map(Cell::to_value).collect()))
                .collect(),
        )
    }
}

impl TryFrom<Vec<Row>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Row>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Row> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(n: i64) -> Cell {
        Cell::Number(n.into())
    }

    #[test]
    fn new_checks_width() {
        let grid = Grid::new(vec!["id", "name"], vec![vec![num(1), Cell::text("Ada")]]).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.field_names(), vec!["id", "name"]);

        let err = Grid::new(vec!["id", "name"], vec![vec![num(1)]]).unwrap_err();
        assert_eq!(
            err,
            GridError::WidthMismatch {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn from_rows_requires_header() {
        assert_eq!(Grid::from_rows(vec![]).unwrap_err(), GridError::MissingHeader);
    }

    #[test]
    fn header_only_grid() {
        let grid = Grid::new(vec!["id"], vec![]).unwrap();
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.data_row_count(), 0);
        assert!(!grid.has_data());
        assert!(grid.data_rows().is_empty());
    }

    #[test]
    fn serde_round_trip_enforces_width() {
        let grid: Grid = serde_json::from_value(json!([["id", "name"], [1, "Ada"]])).unwrap();
        assert_eq!(grid.row(1).unwrap()[1], Cell::text("Ada"));
        assert_eq!(serde_json::to_value(&grid).unwrap(), json!([["id", "name"], [1, "Ada"]]));

        let bad: Result<Grid, _> = serde_json::from_value(json!([["id", "name"], [1]]));
        assert!(bad.is_err());
    }

    #[test]
    fn to_value_matches_serialization() {
        let grid = Grid::new(vec!["a"], vec![vec![Cell::Null]]).unwrap();
        assert_eq!(grid.to_value(), serde_json::to_value(&grid).unwrap());
    }
}
