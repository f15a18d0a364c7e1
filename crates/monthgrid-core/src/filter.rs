//! Relevance filtering for month windows.
//!
//! This module selects, per source, the events that overlap a
//! [`MonthWindow`], applying the yearly-recurrence shift beforehand.
//! Sources that end up with no relevant events are dropped entirely: they
//! do not appear as grid columns.

use tracing::debug;

use crate::event::GridEvent;
use crate::time::MonthWindow;

/// Events grouped by source, in the order sources were supplied.
///
/// Column order in the grid follows insertion order here, so the caller
/// (typically the fetch layer walking the configured feed list) fully
/// determines the layout. A plain ordered list is used instead of a hash
/// map to keep builds deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceEvents {
    entries: Vec<(String, Vec<GridEvent>)>,
}

impl SourceEvents {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source and its events, preserving supply order.
    pub fn push(&mut self, source: impl Into<String>, events: Vec<GridEvent>) {
        self.entries.push((source.into(), events));
    }

    /// Iterates over `(source, events)` pairs in supply order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[GridEvent])> {
        self.entries
            .iter()
            .map(|(name, events)| (name.as_str(), events.as_slice()))
    }

    /// The source names in supply order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no sources are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<GridEvent>)> for SourceEvents {
    fn from_iter<I: IntoIterator<Item = (String, Vec<GridEvent>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Selects the events relevant to `window`, per source.
///
/// For each source:
/// 1. Yearly-recurring events are shifted to the window's year before the
///    overlap test. A shift that lands on a nonexistent date (Feb 29 into
///    a non-leap year) falls back to the original endpoints and the event
///    is treated as non-recurring.
/// 2. Events overlapping the window per [`MonthWindow::is_relevant`] are
///    kept, carrying their (possibly shifted) endpoints.
/// 3. Surviving events are sorted ascending by start.
///
/// Sources with zero relevant events are removed from the result.
pub fn relevant_events(feeds: &SourceEvents, window: &MonthWindow) -> SourceEvents {
    feeds
        .iter()
        .filter_map(|(source, events)| {
            let mut relevant: Vec<GridEvent> = events
                .iter()
                .filter_map(|ev| {
                    let candidate = if ev.recurs_yearly {
                        ev.shifted_to_year(window.year()).unwrap_or_else(|| {
                            debug!(
                                source,
                                summary = %ev.summary,
                                year = window.year(),
                                "yearly shift has no valid date, keeping original"
                            );
                            ev.clone()
                        })
                    } else {
                        ev.clone()
                    };
                    window
                        .is_relevant(candidate.start, candidate.end)
                        .then_some(candidate)
                })
                .collect();
            if relevant.is_empty() {
                debug!(source, "no relevant events, dropping column");
                return None;
            }
            relevant.sort_by_key(|ev| ev.start);
            Some((source.to_string(), relevant))
        })
        .collect()
}
