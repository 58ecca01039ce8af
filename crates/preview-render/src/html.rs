//! HTML output
//!
//! The table is a CSS grid: one `div` per cell, positioned with
//! `grid-column`, carrying the classes from [`DisplayRow::cell_classes`].

use crate::table::{class, DisplayRow, DisplayTable};
use std::borrow::Cow;
use std::fmt::Write;

/// Stylesheet for the preview classes
pub const STYLESHEET: &str = r".grid {
  display: grid;
  grid-auto-flow: row;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  font-size: 0.875rem;
  overflow-x: auto;
}
.row { padding: 0.5rem 0.75rem; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.header { font-weight: 600; text-transform: uppercase; letter-spacing: 0.04em; }
.evenRow { background: #f4f5f7; }
.oddRow { background: #ffffff; }
.firstCell { border-top-left-radius: 0.5rem; border-bottom-left-radius: 0.5rem; }
.lastCell { border-top-right-radius: 0.5rem; border-bottom-right-radius: 0.5rem; }
.rightAligned { text-align: right; }
";

/// Escape text for use in HTML content and attribute values
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

impl DisplayTable {
    /// Table markup
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, r#"<div class="{}">"#, class::GRID);
        for row in &self.rows {
            write_row(&mut out, row);
        }
        out.push_str("</div>\n");
        out
    }

    /// Standalone page with the stylesheet inlined
    #[must_use]
    pub fn to_html_page(&self, title: &str) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape_html(title));
        let _ = writeln!(out, "<style>\n{STYLESHEET}</style>");
        out.push_str("</head>\n<body>\n");
        out.push_str(&self.to_html());
        out.push_str("</body>\n</html>\n");
        out
    }
}

fn write_row(out: &mut String, row: &DisplayRow) {
    for cell in &row.cells {
        let _ = writeln!(
            out,
            r#"  <div style="grid-column: {}" class="{}">{}</div>"#,
            cell.column + 1,
            row.cell_classes(cell).join(" "),
            escape_html(&cell.content)
        );
    }
}
