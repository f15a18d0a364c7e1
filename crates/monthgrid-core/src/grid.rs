//! Month grid construction.
//!
//! This module allocates the empty month grid (one row per calendar day,
//! one column per source) and stamps each relevant event's label into the
//! day cells it spans. Events are clipped at month boundaries; a running
//! maximum of entries per cell is tracked so the presentation layer can
//! size rows uniformly.

use chrono::{Datelike, Timelike, Weekday};
use serde::Serialize;
use tracing::trace;

use crate::event::GridEvent;
use crate::filter::SourceEvents;
use crate::time::MonthWindow;

/// One data row of the grid: a day label plus one cell per source.
///
/// Each cell holds the stamped entry labels in insertion order, which is
/// chronological within a source because the filter sorts per-source
/// events by start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRow {
    label: String,
    cells: Vec<Vec<String>>,
}

impl DayRow {
    /// The weekday + date label, e.g. `"SA 03/02/2024"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The per-source cells in column order.
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }
}

/// The month grid before cell rendering.
///
/// Row 0 is conceptually the header (`"Date"` plus the surviving source
/// names); it is kept separate from the day rows here and reassembled by
/// the cell renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    header: Vec<String>,
    rows: Vec<DayRow>,
}

impl MonthGrid {
    /// Allocates an empty grid for `window` with one column per source.
    fn empty(sources: &SourceEvents, window: &MonthWindow) -> Self {
        let mut header = Vec::with_capacity(sources.len() + 1);
        header.push("Date".to_string());
        header.extend(sources.sources().map(String::from));

        let rows = (1..=window.days_in_month())
            .map(|day| {
                let date = window.date_of_day(day);
                DayRow {
                    label: format!(
                        "{} {}",
                        weekday_label(date.weekday()),
                        date.format("%d/%m/%Y")
                    ),
                    cells: vec![Vec::new(); sources.len()],
                }
            })
            .collect();

        Self { header, rows }
    }

    /// The header row: `"Date"` followed by the source names.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// The day rows, in calendar order (day 1 first).
    pub fn rows(&self) -> &[DayRow] {
        &self.rows
    }

    /// Number of day rows (days in the month).
    pub fn day_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns including the leading date column.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// A built grid together with its occupancy high-water mark.
///
/// `max_cell_entries` is scoped to a single build: it is returned as a
/// value rather than tracked in shared state, so concurrent requests can
/// never interfere with each other's row sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulatedGrid {
    /// The populated month grid.
    pub grid: MonthGrid,
    /// The largest number of entries stamped into any single cell.
    pub max_cell_entries: usize,
}

/// Builds the month grid for `window` from per-source relevant events.
///
/// Column order follows the order sources appear in `sources`; entry
/// order within a cell follows the per-source event order. The result is
/// fully deterministic for a fixed input.
pub fn build_grid(sources: &SourceEvents, window: &MonthWindow) -> PopulatedGrid {
    let mut grid = MonthGrid::empty(sources, window);
    let mut max_cell_entries = 0;

    for (column, (source, events)) in sources.iter().enumerate() {
        for event in events {
            stamp_event(&mut grid, column, source, event, window, &mut max_cell_entries);
        }
    }

    PopulatedGrid {
        grid,
        max_cell_entries,
    }
}

/// Stamps one event into every day cell it spans, clipping at month
/// boundaries.
///
/// The decision sequence, applied once per event:
/// 1. Span is the inclusive day count between the start and end dates.
/// 2. An end at exactly midnight closes the previous day, so the span
///    shrinks by one; if that midnight is the first instant of the target
///    month the event belongs wholly to the previous month and is skipped.
/// 3. A start before the month is clipped to the month's first instant,
///    dropping the clipped days from the span. Clipping resets the start
///    to midnight, so clipped events render as bare summaries.
/// 4. Each spanned day appends the label to the source's cell; days past
///    the end of the month are dropped silently.
fn stamp_event(
    grid: &mut MonthGrid,
    column: usize,
    source: &str,
    event: &GridEvent,
    window: &MonthWindow,
    max_cell_entries: &mut usize,
) {
    let mut start = event.start;
    let end = event.end;

    if start >= window.end() {
        // Nothing of this event is visible in the target month
        return;
    }

    let mut span = (end.date_naive() - start.date_naive()).num_days() + 1;

    if end.hour() == 0 && end.minute() == 0 {
        if end.date_naive() == window.start().date_naive() {
            trace!(source, summary = %event.summary, "ends at month start, skipping");
            return;
        }
        span -= 1;
    }

    if start < window.start() {
        let clipped_days = (window.start().date_naive() - start.date_naive()).num_days();
        span -= clipped_days;
        start = window.start();
    }

    if span <= 0 {
        trace!(source, summary = %event.summary, "no visible days after clipping");
        return;
    }

    let label = if start.hour() == 0 && start.minute() == 0 {
        event.summary.clone()
    } else {
        format!("[{:02}:{:02}] {}", start.hour(), start.minute(), event.summary)
    };

    let first_day = i64::from(start.day());
    let days_in_month = i64::from(window.days_in_month());

    for offset in 0..span {
        let day = first_day + offset;
        if day > days_in_month {
            // Long-running events are clipped at the end of the month
            break;
        }
        let cell = &mut grid.rows[(day - 1) as usize].cells[column];
        cell.push(label.clone());
        *max_cell_entries = (*max_cell_entries).max(cell.len());
    }
}

/// Two-letter weekday label used in day-row headers.
fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}
