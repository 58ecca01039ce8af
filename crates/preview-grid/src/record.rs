//! Records and record sets
//!
//! A record is one JSON object from a sync output. Field order is the order
//! the fields appeared in the source document.

use crate::cell::ValueKind;
use crate::error::ShapeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One synced entity: field name to JSON value, in insertion order
pub type Record = Map<String, Value>;

/// Ordered sequence of records, expected to share one shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Wrap a list of records
    #[inline]
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Read a decoded JSON document as a record set
    ///
    /// # Errors
    /// - `ShapeError::NotAnArray` if the top-level value is not an array
    /// - `ShapeError::NotAnObject` for the first element that is not an object
    pub fn from_value(value: Value) -> Result<Self, ShapeError> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(ShapeError::NotAnArray {
                    found: ValueKind::of(&other),
                })
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(ShapeError::NotAnObject {
                    index,
                    found: ValueKind::of(&other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// No records at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record, whose keys define the header
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Records as a slice
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Whether every record has the first record's keys in the same order
    #[must_use]
    pub fn is_homogeneous(&self) -> bool {
        let Some(first) = self.first() else {
            return true;
        };
        self.records[1..]
            .iter()
            .all(|record| record.keys().eq(first.keys()))
    }

    /// Unwrap into the underlying records
    #[inline]
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for RecordSet {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl TryFrom<Value> for RecordSet {
    type Error = ShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl FromIterator<Record> for RecordSet {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_array_of_objects() {
        let set = RecordSet::from_value(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.first().unwrap()["id"], 1);
    }

    #[test]
    fn empty_array_is_empty_set() {
        let set = RecordSet::from_value(json!([])).unwrap();
        assert!(set.is_empty());
        assert!(set.first().is_none());
    }

    #[test]
    fn rejects_non_array() {
        let err = RecordSet::from_value(json!({"id": 1})).unwrap_err();
        assert_eq!(err, ShapeError::NotAnArray { found: ValueKind::Object });
    }

    #[test]
    fn rejects_non_object_element() {
        let err = RecordSet::from_value(json!([{"id": 1}, 2])).unwrap_err();
        assert_eq!(
            err,
            ShapeError::NotAnObject {
                index: 1,
                found: ValueKind::Number
            }
        );
    }

    #[test]
    fn keeps_field_order() {
        let set: RecordSet =
            serde_json::from_str(r#"[{"zeta": 1, "alpha": 2, "mid": 3}]"#).unwrap();
        let keys: Vec<_> = set.first().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn homogeneity_check() {
        let same = RecordSet::from_value(json!([{"a": 1, "b": 2}, {"a": 3, "b": 4}])).unwrap();
        assert!(same.is_homogeneous());

        let reordered = RecordSet::from_value(json!([{"a": 1, "b": 2}, {"b": 4, "a": 3}])).unwrap();
        assert!(!reordered.is_homogeneous());

        assert!(RecordSet::default().is_homogeneous());
    }
}
