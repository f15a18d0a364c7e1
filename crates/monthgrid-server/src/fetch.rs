//! Concurrent multi-source fetching.
//!
//! Every configured feed is fetched in its own task; the request joins on
//! all of them before building the grid. A source that fails or times out
//! contributes an empty event list (the relevance filter then drops its
//! column), so a single broken feed never fails the whole page.

use std::sync::Arc;

use chrono_tz::Tz;
use tracing::{debug, warn};

use monthgrid_core::{GridEvent, SourceEvents};
use monthgrid_providers::{FeedProvider, normalize_events};

/// Fetches and normalizes all sources concurrently.
///
/// The returned [`SourceEvents`] preserves the supply order of
/// `providers`, which fixes the grid column order.
pub async fn fetch_all_sources(providers: &[Arc<dyn FeedProvider>], tz: Tz) -> SourceEvents {
    let handles: Vec<_> = providers
        .iter()
        .map(|provider| {
            let provider = Arc::clone(provider);
            tokio::spawn(async move { fetch_one(provider.as_ref(), tz).await })
        })
        .collect();

    let mut feeds = SourceEvents::new();
    for handle in handles {
        match handle.await {
            Ok((name, events)) => feeds.push(name, events),
            // A panicked fetch task only loses its own column.
            Err(e) => warn!(error = %e, "feed fetch task failed"),
        }
    }
    feeds
}

async fn fetch_one(provider: &dyn FeedProvider, tz: Tz) -> (String, Vec<GridEvent>) {
    let name = provider.name().to_string();
    match provider.fetch_raw().await {
        Ok(raws) => {
            let events = normalize_events(&raws, &name, tz);
            debug!(source = %name, raw = raws.len(), normalized = events.len(), "source fetched");
            (name, events)
        }
        Err(e) => {
            warn!(
                source = %name,
                error = %e,
                retryable = e.is_retryable(),
                "feed fetch failed, treating source as empty"
            );
            (name, Vec::new())
        }
    }
}
