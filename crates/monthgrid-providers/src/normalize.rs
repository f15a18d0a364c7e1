//! RawFeedEvent to GridEvent normalization.
//!
//! Date-only values are promoted to midnight and both endpoints are
//! expressed in the configured display timezone. Normalization failures
//! are explicit: a raw event either becomes a [`GridEvent`] or a
//! [`SkipReason`], so dropped events stay observable instead of
//! disappearing in control flow.

use std::fmt;

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

use monthgrid_core::GridEvent;

use crate::raw_event::{RawEventTime, RawFeedEvent};

/// Why a raw event was not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The feed entry carried no start.
    MissingStart,
    /// The feed entry carried no end.
    MissingEnd,
    /// The feed marked the event as cancelled.
    Cancelled,
    /// A date-only value could not be resolved to a local midnight
    /// (DST transition at midnight in the display timezone).
    UnresolvableLocalTime,
}

impl SkipReason {
    /// Returns a short identifier for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingStart => "missing_start",
            Self::MissingEnd => "missing_end",
            Self::Cancelled => "cancelled",
            Self::UnresolvableLocalTime => "unresolvable_local_time",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalizes one raw feed event into a [`GridEvent`] for `source`.
///
/// # Errors
///
/// Returns the [`SkipReason`] when the event cannot contribute to the
/// grid. Skips are per-event: the caller continues with the rest of the
/// feed.
pub fn normalize_event(
    raw: &RawFeedEvent,
    source: &str,
    tz: Tz,
) -> Result<GridEvent, SkipReason> {
    if raw.is_cancelled() {
        return Err(SkipReason::Cancelled);
    }

    let start = raw.start.ok_or(SkipReason::MissingStart)?;
    let end = raw.end.ok_or(SkipReason::MissingEnd)?;

    let start = to_zoned(start, tz)?;
    let end = to_zoned(end, tz)?;

    Ok(GridEvent::new(source, raw.effective_summary(), start, end)
        .with_recurs_yearly(raw.recurs_yearly))
}

/// Batch-normalizes a feed, logging and dropping skipped events.
pub fn normalize_events(raws: &[RawFeedEvent], source: &str, tz: Tz) -> Vec<GridEvent> {
    raws.iter()
        .filter_map(|raw| match normalize_event(raw, source, tz) {
            Ok(event) => Some(event),
            Err(reason) => {
                debug!(
                    source,
                    summary = raw.effective_summary(),
                    %reason,
                    "skipping feed event"
                );
                None
            }
        })
        .collect()
}

/// Converts a raw time to the display timezone.
///
/// Datetimes convert directly; dates are promoted to midnight in the
/// display zone so full-day events stay midnight-aligned for the grid's
/// bare-summary rendering.
fn to_zoned(raw: RawEventTime, tz: Tz) -> Result<DateTime<Tz>, SkipReason> {
    match raw {
        RawEventTime::DateTime(dt) => Ok(dt.with_timezone(&tz)),
        RawEventTime::Date(date) => {
            let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
            tz.from_local_datetime(&midnight)
                .earliest()
                .ok_or(SkipReason::UnresolvableLocalTime)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike, Utc};
    use chrono_tz::Europe::Zurich;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn datetime_converts_to_display_zone() {
        // 13:30 UTC is 14:30 in Zurich during winter
        let raw = RawFeedEvent::new(
            RawEventTime::from_datetime(utc(2024, 2, 3, 13, 30)),
            RawEventTime::from_datetime(utc(2024, 2, 3, 14, 0)),
        )
        .with_summary("Dentist");

        let event = normalize_event(&raw, "Papi", Zurich).unwrap();
        assert_eq!(event.source, "Papi");
        assert_eq!(event.summary, "Dentist");
        assert_eq!(event.start.hour(), 14);
        assert_eq!(event.start.minute(), 30);
    }

    #[test]
    fn date_promotes_to_local_midnight() {
        let raw = RawFeedEvent::new(
            RawEventTime::from_date(date(2024, 2, 10)),
            RawEventTime::from_date(date(2024, 2, 11)),
        )
        .with_summary("Holiday");

        let event = normalize_event(&raw, "Papi", Zurich).unwrap();
        assert!(event.starts_at_midnight());
        assert_eq!(event.start.date_naive(), date(2024, 2, 10));
        assert_eq!(event.end.date_naive(), date(2024, 2, 11));
    }

    #[test]
    fn missing_endpoints_are_reported() {
        let mut raw = RawFeedEvent::empty().with_summary("Broken");
        assert_eq!(
            normalize_event(&raw, "Papi", Zurich),
            Err(SkipReason::MissingStart)
        );

        raw.start = Some(RawEventTime::from_date(date(2024, 2, 10)));
        assert_eq!(
            normalize_event(&raw, "Papi", Zurich),
            Err(SkipReason::MissingEnd)
        );
    }

    #[test]
    fn cancelled_events_are_skipped() {
        let raw = RawFeedEvent::new(
            RawEventTime::from_date(date(2024, 2, 10)),
            RawEventTime::from_date(date(2024, 2, 11)),
        )
        .with_status("CANCELLED");

        assert_eq!(
            normalize_event(&raw, "Papi", Zurich),
            Err(SkipReason::Cancelled)
        );
    }

    #[test]
    fn batch_skips_bad_events_and_keeps_the_rest() {
        let raws = vec![
            RawFeedEvent::empty().with_summary("no endpoints"),
            RawFeedEvent::new(
                RawEventTime::from_datetime(utc(2024, 2, 3, 13, 30)),
                RawEventTime::from_datetime(utc(2024, 2, 3, 14, 0)),
            )
            .with_summary("Dentist"),
        ];

        let events = normalize_events(&raws, "Papi", Zurich);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary, "Dentist");
    }

    #[test]
    fn missing_summary_gets_placeholder() {
        let raw = RawFeedEvent::new(
            RawEventTime::from_date(date(2024, 2, 10)),
            RawEventTime::from_date(date(2024, 2, 11)),
        );
        let event = normalize_event(&raw, "Papi", Zurich).unwrap();
        assert_eq!(event.summary, "(No title)");
    }
}
