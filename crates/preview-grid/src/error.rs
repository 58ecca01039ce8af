//! Error types for the grid layer
//!
//! Covers the two ways input can be rejected:
//! - A decoded JSON document that is not a record set
//! - A row set that would break the grid width invariant

use crate::cell::ValueKind;

/// A JSON document could not be read as a record set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// Top-level value is not an array
    #[error("expected an array of records, found {found}")]
    NotAnArray { found: ValueKind },

    /// An array element is not an object
    #[error("record {index} is not an object (found {found})")]
    NotAnObject { index: usize, found: ValueKind },
}

impl ShapeError {
    /// Kind of the value that was rejected
    #[inline]
    #[must_use]
    pub fn found(&self) -> ValueKind {
        match self {
            Self::NotAnArray { found } | Self::NotAnObject { found, .. } => *found,
        }
    }
}

/// Grid construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// No header row supplied
    #[error("grid has no header row")]
    MissingHeader,

    /// A row does not have the header's column count
    #[error("row {row} has {found} cells, header has {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Unrecognized row alignment name
    #[error("unknown row alignment: '{0}' (expected 'by-key' or 'positional')")]
    UnknownAlignment(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_display() {
        let err = ShapeError::NotAnObject {
            index: 3,
            found: ValueKind::Number,
        };
        assert_eq!(err.to_string(), "record 3 is not an object (found number)");
        assert_eq!(err.found(), ValueKind::Number);
    }

    #[test]
    fn width_mismatch_display() {
        let err = GridError::WidthMismatch {
            row: 2,
            expected: 3,
            found: 1,
        };
        assert!(err.to_string().contains("row 2 has 1 cells"));
    }
}
