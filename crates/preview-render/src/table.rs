//! Display table model
//!
//! A [`DisplayTable`] is the styled, bounded view of a grid. Styling is
//! positional only: row parity, header flag, first/last cell and a column
//! threshold for right alignment. The class names match the preview
//! stylesheet in [`crate::html::STYLESHEET`].

use serde::Serialize;

/// Style class names
pub mod class {
    /// Table container
    pub const GRID: &str = "grid";
    /// Every row
    pub const ROW: &str = "row";
    /// Row 0
    pub const HEADER: &str = "header";
    /// Even row index
    pub const EVEN_ROW: &str = "evenRow";
    /// Odd row index
    pub const ODD_ROW: &str = "oddRow";
    /// Column 0
    pub const FIRST_CELL: &str = "firstCell";
    /// Last column
    pub const LAST_CELL: &str = "lastCell";
    /// Column at or beyond the alignment threshold
    pub const RIGHT_ALIGNED: &str = "rightAligned";
}

/// Row index parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowParity {
    Even,
    Odd,
}

impl RowParity {
    /// Parity of a row index
    #[inline]
    #[must_use]
    pub const fn of(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }

    /// Style class
    #[inline]
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Even => class::EVEN_ROW,
            Self::Odd => class::ODD_ROW,
        }
    }
}

/// Row-level style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowStyle {
    /// Header treatment, layered on the parity class
    pub header: bool,
    /// Alternating row class
    pub parity: RowParity,
}

/// Cell-level style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    /// Column 0
    pub first: bool,
    /// Last column
    pub last: bool,
    /// Right-aligned column
    pub right_aligned: bool,
}

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCell {
    /// Column index
    pub column: usize,
    /// Text to show
    pub content: String,
    /// Cell style
    pub style: CellStyle,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    /// Row index in the source grid
    pub index: usize,
    /// Row style
    pub style: RowStyle,
    /// Cells in column order
    pub cells: Vec<DisplayCell>,
}

impl DisplayRow {
    /// Header row
    #[inline]
    #[must_use]
    pub fn is_header(&self) -> bool {
        self.style.header
    }

    /// Style classes of one cell in this row, in a stable order
    #[must_use]
    pub fn cell_classes(&self, cell: &DisplayCell) -> Vec<&'static str> {
        let mut classes = vec![class::ROW];
        if self.style.header {
            classes.push(class::HEADER);
        }
        classes.push(self.style.parity.class());
        if cell.style.first {
            classes.push(class::FIRST_CELL);
        }
        if cell.style.last {
            classes.push(class::LAST_CELL);
        }
        if cell.style.right_aligned {
            classes.push(class::RIGHT_ALIGNED);
        }
        classes
    }
}

/// Bounded, styled view of a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    pub(crate) rows: Vec<DisplayRow>,
    pub(crate) width: usize,
    pub(crate) source_rows: usize,
}

impl DisplayTable {
    /// Rendered rows, header first
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// Rendered row count
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column count
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows in the source grid, header included
    #[inline]
    #[must_use]
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    /// Source rows left out by the row bound
    #[inline]
    #[must_use]
    pub fn hidden_rows(&self) -> usize {
        self.source_rows - self.rows.len()
    }

    /// Header row
    #[inline]
    #[must_use]
    pub fn header(&self) -> Option<&DisplayRow> {
        self.rows.first().filter(|row| row.is_header())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_classes() {
        assert_eq!(RowParity::of(0), RowParity::Even);
        assert_eq!(RowParity::of(3), RowParity::Odd);
        assert_eq!(RowParity::Odd.class(), "oddRow");
    }

    #[test]
    fn header_classes_layer_on_parity() {
        let row = DisplayRow {
            index: 0,
            style: RowStyle {
                header: true,
                parity: RowParity::Even,
            },
            cells: vec![],
        };
        let cell = DisplayCell {
            column: 0,
            content: "id".to_string(),
            style: CellStyle {
                first: true,
                last: true,
                right_aligned: false,
            },
        };
        assert_eq!(
            row.cell_classes(&cell),
            vec!["row", "header", "evenRow", "firstCell", "lastCell"]
        );
    }
}
