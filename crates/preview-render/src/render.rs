//! Grid to display table

use crate::options::RenderOptions;
use crate::table::{CellStyle, DisplayCell, DisplayRow, DisplayTable, RowParity, RowStyle};
use preview_grid::Grid;

/// Render the first rows of a grid as a styled table
///
/// At most `options.max_rows` rows are kept and the header is always among
/// them. Output depends only on the arguments.
#[must_use]
pub fn render(grid: &Grid, options: &RenderOptions) -> DisplayTable {
    let visible = options.visible_rows(grid.row_count());

    let rows = grid.rows()[..visible]
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let last = row.len().saturating_sub(1);
            let cells = row
                .iter()
                .enumerate()
                .map(|(column, cell)| DisplayCell {
                    column,
                    content: cell.display_text().into_owned(),
                    style: CellStyle {
                        first: column == 0,
                        last: column == last,
                        right_aligned: options.is_right_aligned(column),
                    },
                })
                .collect();

            DisplayRow {
                index,
                style: RowStyle {
                    header: index == 0,
                    parity: RowParity::of(index),
                },
                cells,
            }
        })
        .collect();

    DisplayTable {
        rows,
        width: grid.width(),
        source_rows: grid.row_count(),
    }
}
