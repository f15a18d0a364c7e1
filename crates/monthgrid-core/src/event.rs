//! Event types for grid layout.
//!
//! This module provides [`GridEvent`], the canonical event representation
//! consumed by the relevance filter and the grid builder. Events arrive
//! here already normalized: date-only values promoted to midnight and both
//! endpoints converted to the configured display timezone.

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use serde::Serialize;

/// A normalized calendar event bound for the month grid.
///
/// Created once per raw feed record and immutable thereafter. The
/// constructor enforces the `start <= end` invariant by swapping reversed
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridEvent {
    /// The feed this event belongs to (one grid column).
    pub source: String,
    /// The event summary text.
    pub summary: String,
    /// When the event starts, in the display timezone.
    pub start: DateTime<Tz>,
    /// When the event ends, in the display timezone.
    pub end: DateTime<Tz>,
    /// Whether the event repeats every year (single-shift heuristic,
    /// not full recurrence expansion).
    pub recurs_yearly: bool,
}

impl GridEvent {
    /// Creates a new event, swapping `start` and `end` if reversed.
    pub fn new(
        source: impl Into<String>,
        summary: impl Into<String>,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        Self {
            source: source.into(),
            summary: summary.into(),
            start,
            end,
            recurs_yearly: false,
        }
    }

    /// Builder method to mark the event as yearly-recurring.
    pub fn with_recurs_yearly(mut self, recurs: bool) -> Self {
        self.recurs_yearly = recurs;
        self
    }

    /// Returns true if the event starts exactly at midnight.
    ///
    /// Midnight starts render as bare summaries (typically full-day
    /// events); any other start renders with an `[HH:MM]` prefix.
    pub fn starts_at_midnight(&self) -> bool {
        self.start.hour() == 0 && self.start.minute() == 0
    }

    /// Returns a copy of this event with both endpoints shifted to `year`.
    ///
    /// Used by the yearly-recurrence heuristic. Returns `None` when the
    /// shifted date does not exist (e.g. Feb 29 into a non-leap year), in
    /// which case the caller falls back to the original endpoints.
    pub fn shifted_to_year(&self, year: i32) -> Option<Self> {
        use chrono::Datelike;
        let start = self.start.with_year(year)?;
        let end = self.end.with_year(year)?;
        Some(Self {
            start,
            end,
            ..self.clone()
        })
    }
}
