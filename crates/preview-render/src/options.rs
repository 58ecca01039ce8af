//! Render options

use serde::{Deserialize, Serialize};

/// Rows shown by default, header included
pub const DEFAULT_MAX_ROWS: usize = 5;

/// First right-aligned column by default
pub const DEFAULT_RIGHT_ALIGN_FROM: usize = 4;

/// Preview table options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Maximum rows shown, header included. Values below 1 are treated as 1.
    pub max_rows: usize,
    /// Cells at or beyond this column index are right-aligned
    pub right_align_from: Option<usize>,
}

impl RenderOptions {
    /// Default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With maximum row count
    #[inline]
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// With right-alignment threshold
    #[inline]
    #[must_use]
    pub fn with_right_align_from(mut self, column: Option<usize>) -> Self {
        self.right_align_from = column;
        self
    }

    /// Disable right alignment
    #[inline]
    #[must_use]
    pub fn without_right_align(self) -> Self {
        self.with_right_align_from(None)
    }

    /// Rows to show out of `total`
    #[inline]
    #[must_use]
    pub fn visible_rows(&self, total: usize) -> usize {
        self.max_rows.max(1).min(total)
    }

    /// Whether the cell at `column` is right-aligned
    #[inline]
    #[must_use]
    pub fn is_right_aligned(&self, column: usize) -> bool {
        self.right_align_from.is_some_and(|from| column >= from)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            right_align_from: Some(DEFAULT_RIGHT_ALIGN_FROM),
        }
    }
}
