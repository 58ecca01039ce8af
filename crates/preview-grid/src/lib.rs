//! Preview Grid - record sets and display grids
//!
//! Turns the JSON output of a data sync into a header-plus-rows grid:
//! - Reads a decoded JSON array as a [`RecordSet`]
//! - Takes the header from the first record's keys
//! - Places every value in a [`Cell`], collapsing objects and arrays to JSON text
//!
//! # Example
//!
//! ```rust
//! use preview_grid::{normalize, RecordSet};
//! use serde_json::json;
//!
//! let records = RecordSet::from_value(json!([
//!     {"id": 1, "name": "Ada"},
//!     {"id": 2, "name": "Lin"}
//! ]))?;
//!
//! let grid = normalize(Some(&records)).expect("non-empty record set");
//! assert_eq!(grid.row_count(), 3);
//! assert_eq!(grid.field_names(), vec!["id", "name"]);
//! # Ok::<(), preview_grid::ShapeError>(())
//! ```

#![warn(unreachable_pub)]

pub mod cell;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod record;

pub use cell::{Cell, ValueKind};
pub use error::{GridError, ShapeError};
pub use grid::{Grid, Row};
pub use normalize::{normalize, normalize_with, NormalizeOptions, RowAlignment};
pub use record::{Record, RecordSet};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with grids
    pub use crate::{
        normalize, normalize_with, Cell, Grid, NormalizeOptions, Record, RecordSet, RowAlignment,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
