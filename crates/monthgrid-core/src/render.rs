//! Cell rendering.
//!
//! Converts a populated [`MonthGrid`] into a plain-string grid: the header
//! row first, then one row per calendar day, every cell either empty or
//! its entries joined with a separator. This is the last step of the core
//! pipeline; markup, colors and any text substitution belong to the
//! presentation layer consuming the result.

use serde::Serialize;

use crate::grid::MonthGrid;

/// Separator placed between entries of a multi-entry cell.
///
/// The default suits the HTML presentation collaborator; a plain-text
/// consumer can pass `"\n"` instead.
pub const DEFAULT_CELL_SEPARATOR: &str = "<br>";

/// A fully rendered grid of display strings.
///
/// Row 0 is the header (`"Date"` plus source names); rows 1..=N are the
/// calendar days. Every row has the same width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedGrid {
    rows: Vec<Vec<String>>,
}

impl RenderedGrid {
    /// All rows, header first.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The header row.
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Total number of rows including the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns including the leading date column.
    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }
}

/// Renders every cell of `grid` to its final display string.
///
/// Pure and total: empty cells become empty strings, multi-entry cells
/// are joined with `separator` in insertion order.
pub fn render_cells(grid: &MonthGrid, separator: &str) -> RenderedGrid {
    let mut rows = Vec::with_capacity(grid.day_count() + 1);
    rows.push(grid.header().to_vec());

    for day in grid.rows() {
        let mut row = Vec::with_capacity(grid.column_count());
        row.push(day.label().to_string());
        row.extend(day.cells().iter().map(|entries| entries.join(separator)));
        rows.push(row);
    }

    RenderedGrid { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::GridEvent;
    use crate::filter::SourceEvents;
    use crate::grid::build_grid;
    use crate::time::MonthWindow;
    use chrono::{DateTime, TimeZone};
    use chrono_tz::Europe::Zurich;
    use chrono_tz::Tz;

    fn zurich(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        Zurich.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn built() -> crate::grid::PopulatedGrid {
        let mut sources = SourceEvents::new();
        sources.push(
            "A",
            vec![
                GridEvent::new(
                    "A",
                    "Standup",
                    zurich(2024, 2, 3, 9, 0),
                    zurich(2024, 2, 3, 9, 15),
                ),
                GridEvent::new(
                    "A",
                    "Dentist",
                    zurich(2024, 2, 3, 14, 30),
                    zurich(2024, 2, 3, 15, 0),
                ),
            ],
        );
        let window = MonthWindow::for_month(2024, 2, Zurich).unwrap();
        build_grid(&sources, &window)
    }

    #[test]
    fn header_row_comes_first() {
        let rendered = render_cells(&built().grid, DEFAULT_CELL_SEPARATOR);
        assert_eq!(rendered.header(), &["Date", "A"]);
        assert_eq!(rendered.row_count(), 30); // header + 29 days
        assert_eq!(rendered.column_count(), 2);
    }

    #[test]
    fn entries_join_with_separator_in_order() {
        let rendered = render_cells(&built().grid, DEFAULT_CELL_SEPARATOR);
        assert_eq!(rendered.rows()[3][1], "[09:00] Standup<br>[14:30] Dentist");
    }

    #[test]
    fn empty_cells_render_as_empty_strings() {
        let rendered = render_cells(&built().grid, DEFAULT_CELL_SEPARATOR);
        assert_eq!(rendered.rows()[1][1], "");
        assert_eq!(rendered.rows()[29][1], "");
    }

    #[test]
    fn custom_separator() {
        let rendered = render_cells(&built().grid, "\n");
        assert_eq!(rendered.rows()[3][1], "[09:00] Standup\n[14:30] Dentist");
    }

    #[test]
    fn rows_are_uniform_width() {
        let rendered = render_cells(&built().grid, DEFAULT_CELL_SEPARATOR);
        for row in rendered.rows() {
            assert_eq!(row.len(), rendered.column_count());
        }
    }
}
