//! FeedProvider trait definition.
//!
//! [`FeedProvider`] is the abstraction for calendar feed backends. A
//! provider fetches the raw events of one source; normalization and grid
//! layout happen downstream and never depend on where the events came
//! from.

use std::future::Future;
use std::pin::Pin;

use crate::error::FeedResult;
use crate::raw_event::RawFeedEvent;

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe, so the server can hold a
/// heterogeneous list of `Box<dyn FeedProvider>` columns.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The abstraction for calendar feed backends.
///
/// Implementations must be `Send + Sync`: the server fetches all sources
/// concurrently and shares providers across request tasks.
pub trait FeedProvider: Send + Sync {
    /// Returns the source name this provider feeds (used as the grid
    /// column header).
    fn name(&self) -> &str;

    /// Fetches the raw events of this source.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` on network failures, timeouts, bad HTTP
    /// statuses or unparseable feed bodies. The caller decides whether a
    /// failed source degrades to an empty column.
    fn fetch_raw(&self) -> BoxFuture<'_, FeedResult<Vec<RawFeedEvent>>>;
}

/// A provider serving a fixed set of events.
///
/// Useful in tests and as a column for local, non-remote sources.
#[derive(Debug, Clone)]
pub struct StaticProvider {
    name: String,
    events: Vec<RawFeedEvent>,
}

impl StaticProvider {
    /// Creates a provider that always returns `events`.
    pub fn new(name: impl Into<String>, events: Vec<RawFeedEvent>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }
}

impl FeedProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_raw(&self) -> BoxFuture<'_, FeedResult<Vec<RawFeedEvent>>> {
        let events = self.events.clone();
        Box::pin(async move { Ok(events) })
    }
}
