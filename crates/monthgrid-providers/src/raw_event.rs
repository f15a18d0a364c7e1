//! Raw event type from calendar feeds.
//!
//! [`RawFeedEvent`] is the wire-shaped representation of one feed entry
//! before normalization: start/end may be missing or date-only, the
//! summary may be absent, and a yearly repetition may be flagged. The
//! normalizer turns it into a [`monthgrid_core::GridEvent`] or an explicit
//! skip reason.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The time specification for a raw feed event.
///
/// Feeds carry either full datetimes or bare dates (all-day events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RawEventTime {
    /// A specific datetime in UTC.
    DateTime(DateTime<Utc>),
    /// A date without time-of-day (all-day event).
    Date(NaiveDate),
}

impl RawEventTime {
    /// Creates a RawEventTime from a UTC datetime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a RawEventTime from a date (all-day event).
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date)
    }

    /// Returns true if this is a date-only value.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

/// One event as decoded from a feed, before normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFeedEvent {
    /// When the event starts, if the feed supplied it.
    pub start: Option<RawEventTime>,

    /// When the event ends, if the feed supplied it.
    pub end: Option<RawEventTime>,

    /// The event title/summary.
    pub summary: Option<String>,

    /// The event status as reported by the feed (e.g. "CONFIRMED",
    /// "CANCELLED").
    pub status: Option<String>,

    /// Whether the event repeats every year (derived from a yearly
    /// recurrence rule in the feed).
    pub recurs_yearly: bool,
}

impl RawFeedEvent {
    /// Creates a raw event with both endpoints present.
    pub fn new(start: RawEventTime, end: RawEventTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            summary: None,
            status: None,
            recurs_yearly: false,
        }
    }

    /// Creates a raw event with no fields set.
    pub fn empty() -> Self {
        Self {
            start: None,
            end: None,
            summary: None,
            status: None,
            recurs_yearly: false,
        }
    }

    /// Returns the effective title, falling back to "(No title)".
    pub fn effective_summary(&self) -> &str {
        self.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("(No title)")
    }

    /// Returns true if the feed marked the event as cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("cancelled"))
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Builder method to flag yearly repetition.
    pub fn with_recurs_yearly(mut self, recurs: bool) -> Self {
        self.recurs_yearly = recurs;
        self
    }
}
