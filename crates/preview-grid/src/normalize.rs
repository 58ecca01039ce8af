//! Record set to grid normalization
//!
//! The header comes from the first record's keys. Every record, the first
//! included, becomes one row in input order. Values are placed with
//! [`Cell::from_value`]: objects and arrays become their JSON text, everything
//! else is kept as-is.

use crate::cell::Cell;
use crate::error::GridError;
use crate::grid::{Grid, Row};
use crate::record::{Record, RecordSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a record's values are matched to header columns
///
/// Both strategies give the same grid when every record has the header's
/// keys in the header's order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowAlignment {
    /// Look each header field up by name; missing fields are null, extra
    /// fields are dropped
    #[default]
    ByKey,
    /// Take the record's own value order, padded with null or truncated to
    /// the header width
    Positional,
}

impl RowAlignment {
    /// Canonical name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ByKey => "by-key",
            Self::Positional => "positional",
        }
    }
}

impl fmt::Display for RowAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RowAlignment {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "by-key" | "by_key" | "key" => Ok(Self::ByKey),
            "positional" | "position" => Ok(Self::Positional),
            other => Err(GridError::UnknownAlignment(other.to_string())),
        }
    }
}

/// Normalization options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Column matching strategy
    pub alignment: RowAlignment,
}

impl NormalizeOptions {
    /// Default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With row alignment
    #[inline]
    #[must_use]
    pub fn with_alignment(mut self, alignment: RowAlignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Normalize a possibly absent record set with default options
///
/// Returns `None` for an absent or empty record set, so callers can tell
/// "no data" apart from a grid with zero data rows.
#[must_use]
pub fn normalize(records: Option<&RecordSet>) -> Option<Grid> {
    records.and_then(|set| normalize_with(set, NormalizeOptions::default()))
}

/// Normalize a record set
///
/// Returns `None` when the set is empty.
#[must_use]
pub fn normalize_with(records: &RecordSet, options: NormalizeOptions) -> Option<Grid> {
    let first = records.first()?;
    let header: Vec<String> = first.keys().cloned().collect();

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(index, record)| match options.alignment {
            RowAlignment::ByKey => row_by_key(first, record, index),
            RowAlignment::Positional => row_positional(header.len(), record, index),
        })
        .collect();

    tracing::debug!(
        records = records.len(),
        columns = header.len(),
        alignment = %options.alignment,
        "normalized record set"
    );

    Some(Grid::assemble(header, rows))
}

fn row_by_key(header: &Record, record: &Record, index: usize) -> Row {
    let extra = record.keys().filter(|key| !header.contains_key(*key)).count();
    let mut missing = 0usize;

    let row = header
        .keys()
        .map(|key| match record.get(key) {
            Some(value) => Cell::from_value(value),
            None => {
                missing += 1;
                Cell::Null
            }
        })
        .collect();

    if missing > 0 || extra > 0 {
        tracing::debug!(record = index, missing, extra, "record keys differ from header");
    }
    row
}

fn row_positional(width: usize, record: &Record, index: usize) -> Row {
    let mut row: Row = record.values().take(width).map(Cell::from_value).collect();
    if record.len() != width {
        tracing::debug!(
            record = index,
            fields = record.len(),
            width,
            "record width differs from header"
        );
    }
    row.resize(width, Cell::Null);
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn set(value: serde_json::Value) -> RecordSet {
        RecordSet::from_value(value).unwrap()
    }

    #[test]
    fn absent_and_empty_are_none() {
        assert!(normalize(None).is_none());
        assert!(normalize(Some(&RecordSet::default())).is_none());
    }

    #[test]
    fn two_records() {
        let records = set(json!([{"id": 1, "name": "Ada"}, {"id": 2, "name": "Lin"}]));
        let grid = normalize(Some(&records)).unwrap();
        assert_eq!(
            serde_json::to_value(&grid).unwrap(),
            json!([["id", "name"], [1, "Ada"], [2, "Lin"]])
        );
    }

    #[test]
    fn nested_object_becomes_text() {
        let records = set(json!([{"meta": {"nested": true}, "tags": ["a", "b"]}]));
        let grid = normalize(Some(&records)).unwrap();
        assert_eq!(grid.row(1).unwrap()[0], Cell::text(r#"{"nested":true}"#));
        assert_eq!(grid.row(1).unwrap()[1], Cell::text(r#"["a","b"]"#));
    }

    #[test]
    fn primitives_keep_their_kind() {
        let records = set(json!([{"n": null, "b": false, "x": 2.5, "s": "txt"}]));
        let grid = normalize(Some(&records)).unwrap();
        let row = grid.row(1).unwrap();
        assert_eq!(row[0], Cell::Null);
        assert_eq!(row[1], Cell::Bool(false));
        assert_eq!(row[2].to_value(), json!(2.5));
        assert_eq!(row[3], Cell::text("txt"));
    }

    #[test]
    fn by_key_reconciles_reordered_and_missing_fields() {
        let records = set(json!([
            {"id": 1, "name": "Ada", "city": "London"},
            {"name": "Lin", "id": 2},
            {"city": "Paris", "id": 3, "name": "Eve", "extra": true}
        ]));
        let grid = normalize(Some(&records)).unwrap();
        assert_eq!(
            grid.to_value(),
            json!([
                ["id", "name", "city"],
                [1, "Ada", "London"],
                [2, "Lin", null],
                [3, "Eve", "Paris"]
            ])
        );
    }

    #[test]
    fn positional_uses_each_records_order() {
        let records = set(json!([
            {"id": 1, "name": "Ada"},
            {"name": "Lin", "id": 2},
            {"only": "x"},
            {"a": 1, "b": 2, "c": 3}
        ]));
        let options = NormalizeOptions::new().with_alignment(RowAlignment::Positional);
        let grid = normalize_with(&records, options).unwrap();
        assert_eq!(
            grid.to_value(),
            json!([
                ["id", "name"],
                [1, "Ada"],
                ["Lin", 2],
                ["x", null],
                [1, 2]
            ])
        );
    }

    #[test]
    fn empty_first_record_gives_zero_width_grid() {
        let records = set(json!([{}, {"a": 1}]));
        let grid = normalize(Some(&records)).unwrap();
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn alignment_parsing() {
        assert_eq!("by-key".parse::<RowAlignment>().unwrap(), RowAlignment::ByKey);
        assert_eq!("Positional".parse::<RowAlignment>().unwrap(), RowAlignment::Positional);
        assert!("diagonal".parse::<RowAlignment>().is_err());
        assert_eq!(RowAlignment::Positional.to_string(), "positional");
    }
}
