//! ICS/iCalendar parsing.
//!
//! This module parses iCalendar (RFC 5545) data and converts each VEVENT
//! to a [`RawFeedEvent`]. A body that is not valid iCalendar data is an
//! [`FeedErrorCode::InvalidFeed`](crate::error::FeedErrorCode) error;
//! individual components with missing fields are kept and sorted out by
//! the normalizer.

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarComponent, Component, DatePerhapsTime, Event, EventLike};
use tracing::{debug, warn};

use crate::error::{FeedError, FeedResult};
use crate::raw_event::{RawEventTime, RawFeedEvent};

/// Parses ICS content and extracts events.
///
/// `source` is used for log and error context.
///
/// # Errors
///
/// Returns an invalid-feed error when the body is not iCalendar data.
pub fn parse_ics_content(ics: &str, source: &str) -> FeedResult<Vec<RawFeedEvent>> {
    let calendar = ics.parse::<Calendar>().map_err(|e| {
        FeedError::invalid_feed(format!("not valid iCalendar data: {e}"))
            .with_source_name(source)
    })?;

    Ok(calendar
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(parse_event(event, source)),
            _ => None,
        })
        .collect())
}

/// Parses a single VEVENT component.
fn parse_event(event: &Event, source: &str) -> RawFeedEvent {
    let mut raw = RawFeedEvent::empty();

    raw.start = event.get_start().map(convert_date_time);
    // A VEVENT without DTEND is a point in time: reuse the start.
    raw.end = event.get_end().map(convert_date_time).or(raw.start);

    if let Some(summary) = event.get_summary() {
        raw = raw.with_summary(summary);
    }
    if let Some(status) = event.get_status() {
        raw = raw.with_status(format!("{:?}", status));
    }
    if let Some(rrule) = event.property_value("RRULE") {
        raw = raw.with_recurs_yearly(is_yearly_rule(rrule));
    }

    debug!(
        source,
        summary = ?raw.summary,
        start = ?raw.start,
        recurs_yearly = raw.recurs_yearly,
        "parsed event from ICS"
    );

    raw
}

/// Returns true for an RRULE with a yearly frequency.
fn is_yearly_rule(rrule: &str) -> bool {
    rrule
        .split(';')
        .filter_map(|part| part.split_once('='))
        .any(|(key, value)| {
            key.trim().eq_ignore_ascii_case("FREQ") && value.trim().eq_ignore_ascii_case("YEARLY")
        })
}

/// Converts icalendar DatePerhapsTime to RawEventTime.
///
/// Zoned datetimes are resolved through their TZID when it names a known
/// IANA zone; floating and unresolvable values are read as UTC.
fn convert_date_time(dt: DatePerhapsTime) -> RawEventTime {
    match dt {
        DatePerhapsTime::Date(date) => RawEventTime::from_date(date),
        DatePerhapsTime::DateTime(cdt) => {
            use icalendar::CalendarDateTime;
            let utc_dt = match cdt {
                CalendarDateTime::Utc(dt) => dt,
                CalendarDateTime::Floating(naive) => Utc.from_utc_datetime(&naive),
                CalendarDateTime::WithTimezone { date_time, tzid } => {
                    match tzid.parse::<Tz>() {
                        Ok(tz) => tz
                            .from_local_datetime(&date_time)
                            .earliest()
                            .map(|dt| dt.with_timezone(&Utc))
                            .unwrap_or_else(|| Utc.from_utc_datetime(&date_time)),
                        Err(_) => {
                            warn!(tzid, "unknown TZID in feed, reading datetime as UTC");
                            Utc.from_utc_datetime(&date_time)
                        }
                    }
                }
            };
            RawEventTime::from_datetime(utc_dt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate};

    fn sample_ics() -> &'static str {
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Test//Test//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:dentist-1@example.com\r\n\
         DTSTART:20240203T133000Z\r\n\
         DTEND:20240203T140000Z\r\n\
         SUMMARY:Dentist\r\n\
         STATUS:CONFIRMED\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR"
    }

    fn all_day_ics() -> &'static str {
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         BEGIN:VEVENT\r\n\
         UID:holiday-1@example.com\r\n\
         DTSTART;VALUE=DATE:20240210\r\n\
         DTEND;VALUE=DATE:20240211\r\n\
         SUMMARY:Company Holiday\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR"
    }

    fn birthday_ics() -> &'static str {
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         BEGIN:VEVENT\r\n\
         UID:mara-1@example.com\r\n\
         DTSTART;VALUE=DATE:19890214\r\n\
         DTEND;VALUE=DATE:19890215\r\n\
         RRULE:FREQ=YEARLY\r\n\
         SUMMARY:Mara\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR"
    }

    fn zoned_ics() -> &'static str {
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         BEGIN:VEVENT\r\n\
         UID:zoned-1@example.com\r\n\
         DTSTART;TZID=Europe/Zurich:20240203T143000\r\n\
         DTEND;TZID=Europe/Zurich:20240203T150000\r\n\
         SUMMARY:Dentist\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR"
    }

    #[test]
    fn parse_basic_event() {
        let events = parse_ics_content(sample_ics(), "test").unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.summary, Some("Dentist".to_string()));
        assert!(!event.recurs_yearly);
        assert!(!event.is_cancelled());

        let expected: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 2, 3, 13, 30, 0).unwrap();
        assert_eq!(event.start, Some(RawEventTime::from_datetime(expected)));
    }

    #[test]
    fn parse_all_day_event() {
        let events = parse_ics_content(all_day_ics(), "test").unwrap();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.summary, Some("Company Holiday".to_string()));
        assert_eq!(
            event.start,
            Some(RawEventTime::from_date(
                NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
            ))
        );
        assert!(event.start.unwrap().is_all_day());
    }

    #[test]
    fn parse_yearly_recurrence() {
        let events = parse_ics_content(birthday_ics(), "test").unwrap();

        assert_eq!(events.len(), 1);
        assert!(events[0].recurs_yearly);
    }

    #[test]
    fn parse_zoned_datetime() {
        let events = parse_ics_content(zoned_ics(), "test").unwrap();

        // 14:30 Zurich in winter is 13:30 UTC
        let expected: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 2, 3, 13, 30, 0).unwrap();
        assert_eq!(events[0].start, Some(RawEventTime::from_datetime(expected)));
    }

    #[test]
    fn garbage_input_is_an_invalid_feed_error() {
        let err = parse_ics_content("not a calendar at all", "test").unwrap_err();
        assert_eq!(err.code(), crate::error::FeedErrorCode::InvalidFeed);
        assert_eq!(err.source_name(), Some("test"));
    }

    #[test]
    fn yearly_rule_detection() {
        assert!(is_yearly_rule("FREQ=YEARLY"));
        assert!(is_yearly_rule("FREQ=YEARLY;INTERVAL=1"));
        assert!(is_yearly_rule("INTERVAL=1;FREQ=yearly"));
        assert!(!is_yearly_rule("FREQ=WEEKLY;BYDAY=MO"));
        assert!(!is_yearly_rule(""));
    }
}
