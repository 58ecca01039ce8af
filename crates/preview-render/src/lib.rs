//! Preview Render - bounded, styled preview tables
//!
//! Takes a [`preview_grid::Grid`] and produces a [`DisplayTable`]:
//! - At most [`RenderOptions::max_rows`] rows, header always included
//! - Alternating row classes, header treatment on row 0
//! - Edge classes on the first and last cell of every row
//! - Right alignment from a configurable column index
//!
//! The table can be written as HTML ([`DisplayTable::to_html`]) or as aligned
//! plain text ([`DisplayTable::to_text`]).
//!
//! # Example
//!
//! ```rust
//! use preview_grid::{Cell, Grid};
//! use preview_render::{render, RenderOptions};
//!
//! let grid = Grid::new(vec!["id", "name"], vec![vec![Cell::Number(1.into()), Cell::text("Ada")]])?;
//! let table = render(&grid, &RenderOptions::default());
//!
//! assert_eq!(table.row_count(), 2);
//! assert!(table.rows()[0].is_header());
//! print!("{}", table.to_text());
//! # Ok::<(), preview_grid::GridError>(())
//! ```

#![warn(unreachable_pub)]

pub mod html;
pub mod options;
pub mod placeholder;
pub mod render;
pub mod table;
mod text;

pub use html::{escape_html, STYLESHEET};
pub use options::{RenderOptions, DEFAULT_MAX_ROWS, DEFAULT_RIGHT_ALIGN_FROM};
pub use placeholder::{no_data_html, no_data_message};
pub use render::render;
pub use table::{CellStyle, DisplayCell, DisplayRow, DisplayTable, RowParity, RowStyle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
