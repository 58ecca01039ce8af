//! Terminal output
//!
//! Columns are padded to their widest cell (display width, not bytes) and
//! separated by two spaces. Right-aligned cells are padded on the left. A
//! rule follows the header row.

use crate::table::{DisplayRow, DisplayTable};
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "  ";

impl DisplayTable {
    /// Plain-text table
    #[must_use]
    pub fn to_text(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        for row in &self.rows {
            push_row(&mut out, row, &widths);
            if row.is_header() && !widths.is_empty() {
                let rule = widths
                    .iter()
                    .map(|width| "-".repeat(*width))
                    .collect::<Vec<_>>()
                    .join(COLUMN_GAP);
                out.push_str(&rule);
                out.push('\n');
            }
        }
        out
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0usize; self.width];
        for row in &self.rows {
            for cell in &row.cells {
                if let Some(width) = widths.get_mut(cell.column) {
                    *width = (*width).max(cell.content.width());
                }
            }
        }
        widths
    }
}

fn push_row(out: &mut String, row: &DisplayRow, widths: &[usize]) {
    let line = row
        .cells
        .iter()
        .map(|cell| {
            let width = widths.get(cell.column).copied().unwrap_or(0);
            let pad = " ".repeat(width.saturating_sub(cell.content.width()));
            if cell.style.right_aligned {
                format!("{pad}{}", cell.content)
            } else {
                format!("{}{pad}", cell.content)
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}
