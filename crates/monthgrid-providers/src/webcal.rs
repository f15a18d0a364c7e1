//! HTTP(S) calendar feed provider.
//!
//! Fetches a published ICS feed over HTTP and parses it into raw events.
//! `webcal://` URLs, common in published calendar links, are rewritten to
//! `https://` at construction time.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{FeedError, FeedResult};
use crate::ics::parse_ics_content;
use crate::provider::{BoxFuture, FeedProvider};
use crate::raw_event::RawFeedEvent;

/// Default per-source fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// A [`FeedProvider`] backed by a remote ICS feed URL.
#[derive(Debug, Clone)]
pub struct WebcalProvider {
    name: String,
    url: Url,
    client: reqwest::Client,
}

impl WebcalProvider {
    /// Creates a provider for `url` with the given per-fetch timeout.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unsupported URL schemes or when
    /// the HTTP client cannot be built.
    pub fn new(name: impl Into<String>, url: Url, timeout: Duration) -> FeedResult<Self> {
        let name = name.into();
        let url = normalize_scheme(url).map_err(|e| e.with_source_name(&name))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                FeedError::configuration("failed to build HTTP client")
                    .with_source_name(&name)
                    .with_cause(e)
            })?;

        Ok(Self { name, url, client })
    }

    /// Returns the feed URL after scheme normalization.
    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn fetch_body(&self) -> FeedResult<String> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::http(format!("feed answered with status {status}"))
                .with_source_name(&self.name));
        }

        response.text().await.map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, e: reqwest::Error) -> FeedError {
        let err = if e.is_timeout() {
            FeedError::timeout("feed fetch timed out")
        } else {
            FeedError::network("feed fetch failed")
        };
        err.with_source_name(&self.name).with_cause(e)
    }
}

impl FeedProvider for WebcalProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_raw(&self) -> BoxFuture<'_, FeedResult<Vec<RawFeedEvent>>> {
        Box::pin(async move {
            let body = self.fetch_body().await?;
            let events = parse_ics_content(&body, &self.name)?;
            debug!(
                source = %self.name,
                url = %self.url,
                count = events.len(),
                "fetched calendar feed"
            );
            Ok(events)
        })
    }
}

/// Rewrites `webcal://` to `https://` and rejects non-HTTP schemes.
fn normalize_scheme(url: Url) -> FeedResult<Url> {
    match url.scheme() {
        "http" | "https" => Ok(url),
        "webcal" => {
            // Url::set_scheme refuses webcal -> https, so rebuild from text.
            let rewritten = format!("https{}", &url.as_str()["webcal".len()..]);
            rewritten.parse().map_err(|e| {
                FeedError::configuration(format!("invalid webcal URL {url}")).with_cause(e)
            })
        }
        other => Err(FeedError::configuration(format!(
            "unsupported feed URL scheme '{other}'"
        ))),
    }
}
