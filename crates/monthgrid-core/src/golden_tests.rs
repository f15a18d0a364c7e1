//! Golden tests for the layout pipeline.
//!
//! These run the full filter → build → render chain on a fixed set of
//! events and pin the resulting grid. Run `cargo insta review` to update
//! snapshots after intentional changes.

use chrono::{DateTime, TimeZone};
use chrono_tz::Europe::Zurich;
use chrono_tz::Tz;

use crate::event::GridEvent;
use crate::filter::{SourceEvents, relevant_events};
use crate::grid::build_grid;
use crate::render::{DEFAULT_CELL_SEPARATOR, RenderedGrid, render_cells};
use crate::time::MonthWindow;

fn zurich(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    Zurich.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Renders a row range as readable lines for snapshotting.
///
/// Cells are joined with ` | ` and lines are right-trimmed so empty
/// trailing cells do not leave invisible whitespace in snapshots.
fn grid_lines(rendered: &RenderedGrid, rows: std::ops::Range<usize>) -> String {
    rendered.rows()[rows]
        .iter()
        .map(|row| row.join(" | ").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn family_february() -> (SourceEvents, MonthWindow) {
    let mut feeds = SourceEvents::new();
    feeds.push(
        "Papi",
        vec![
            GridEvent::new(
                "Papi",
                "Dentist",
                zurich(2024, 2, 3, 14, 30),
                zurich(2024, 2, 3, 15, 0),
            ),
            GridEvent::new(
                "Papi",
                "Ski week",
                zurich(2024, 1, 28, 9, 0),
                zurich(2024, 2, 5, 9, 0),
            ),
        ],
    );
    feeds.push(
        "Birthdays",
        vec![
            GridEvent::new(
                "Birthdays",
                "Mara",
                zurich(1989, 2, 14, 0, 0),
                zurich(1989, 2, 15, 0, 0),
            )
            .with_recurs_yearly(true),
        ],
    );
    let window = MonthWindow::for_month(2024, 2, Zurich).unwrap();
    (feeds, window)
}

fn render_family_february() -> RenderedGrid {
    let (feeds, window) = family_february();
    let relevant = relevant_events(&feeds, &window);
    let built = build_grid(&relevant, &window);
    render_cells(&built.grid, DEFAULT_CELL_SEPARATOR)
}

#[test]
fn first_week_of_february() {
    let rendered = render_family_february();
    insta::assert_snapshot!(grid_lines(&rendered, 0..6), @r"
    Date | Papi | Birthdays
    TH 01/02/2024 | Ski week |
    FR 02/02/2024 | Ski week |
    SA 03/02/2024 | Ski week<br>[14:30] Dentist |
    SU 04/02/2024 | Ski week |
    MO 05/02/2024 | Ski week |
    ");
}

#[test]
fn shifted_birthday_lands_on_its_day() {
    let rendered = render_family_february();
    insta::assert_snapshot!(grid_lines(&rendered, 14..15), @"WE 14/02/2024 |  | Mara");
}

#[test]
fn pipeline_is_idempotent() {
    let first = serde_json::to_string(&render_family_february()).unwrap();
    let second = serde_json::to_string(&render_family_february()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn dentist_end_to_end_example() {
    // One source, one timed event: exactly one populated cell and the
    // source survives as a column.
    let mut feeds = SourceEvents::new();
    feeds.push(
        "A",
        vec![GridEvent::new(
            "A",
            "Dentist",
            zurich(2024, 2, 3, 14, 30),
            zurich(2024, 2, 3, 14, 30),
        )],
    );
    let window = MonthWindow::for_month(2024, 2, Zurich).unwrap();
    let relevant = relevant_events(&feeds, &window);
    let built = build_grid(&relevant, &window);
    let rendered = render_cells(&built.grid, DEFAULT_CELL_SEPARATOR);

    assert_eq!(rendered.header(), &["Date", "A"]);
    assert_eq!(rendered.row_count(), 30);
    for (idx, row) in rendered.rows().iter().enumerate().skip(1) {
        if idx == 3 {
            assert_eq!(row[1], "[14:30] Dentist");
        } else {
            assert_eq!(row[1], "");
        }
    }
    assert_eq!(built.max_cell_entries, 1);
}
