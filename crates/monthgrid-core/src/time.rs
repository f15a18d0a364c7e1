//! Month window math.
//!
//! This module provides [`MonthWindow`], the half-open interval
//! `[first_of_month, first_of_next_month)` in the configured display
//! timezone. All relevance decisions and grid bounds derive from it.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use chrono_tz::Tz;

use crate::error::GridError;

/// The half-open date interval covering one calendar month.
///
/// `start` is the first instant of the month (inclusive), `end` the first
/// instant of the following month (exclusive), both in the configured
/// display timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl MonthWindow {
    /// Creates the window for the given year and month.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidMonth`] if `(year, month)` does not name
    /// a real calendar month. This is the only fatal error in the core.
    pub fn for_month(year: i32, month: u32, tz: Tz) -> Result<Self, GridError> {
        let start = month_start(year, month, tz)?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = month_start(next_year, next_month, tz)?;
        Ok(Self { start, end })
    }

    /// First instant of the month (inclusive).
    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    /// First instant of the next month (exclusive).
    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    /// The target year.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// The target month (1-12).
    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// Number of calendar days in the month.
    pub fn days_in_month(&self) -> u32 {
        (self.end.date_naive() - self.start.date_naive()).num_days() as u32
    }

    /// The calendar date of the given day of the month (1-based).
    pub fn date_of_day(&self, day: u32) -> NaiveDate {
        self.start.date_naive() + chrono::Days::new(u64::from(day - 1))
    }

    /// Returns true if the instant falls inside `[start, end)`.
    pub fn contains(&self, dt: DateTime<Tz>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Relevance test for an event against this window.
    ///
    /// An event is relevant iff it starts inside `[start, end)` or ends
    /// inside `(start, end]`. An event ending exactly at `start` or
    /// starting exactly at `end` is excluded.
    pub fn is_relevant(&self, ev_start: DateTime<Tz>, ev_end: DateTime<Tz>) -> bool {
        (self.start <= ev_start && ev_start < self.end)
            || (self.start < ev_end && ev_end <= self.end)
    }
}

/// Midnight at the first day of `(year, month)` in `tz`.
fn month_start(year: i32, month: u32, tz: Tz) -> Result<DateTime<Tz>, GridError> {
    let date = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(GridError::InvalidMonth { year, month })?;
    let naive = date
        .and_hms_opt(0, 0, 0)
        .ok_or(GridError::InvalidMonth { year, month })?;
    // earliest() resolves the rare case of a DST transition at midnight
    tz.from_local_datetime(&naive)
        .earliest()
        .ok_or(GridError::InvalidMonth { year, month })
}
