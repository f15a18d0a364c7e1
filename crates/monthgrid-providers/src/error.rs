//! Error types for feed operations.
//!
//! A failing feed never fails the whole grid request: the fetch layer
//! logs the error and treats the source as empty. The classification here
//! exists so callers can log meaningfully and decide about retries.

use std::fmt;
use thiserror::Error;

/// The category of a feed error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedErrorCode {
    /// Network error - connection failed, DNS resolution, etc.
    Network,
    /// The fetch exceeded the per-source timeout.
    Timeout,
    /// The server answered with a non-success HTTP status.
    Http,
    /// The feed body could not be parsed as iCalendar data.
    InvalidFeed,
    /// Configuration error - missing or invalid feed settings.
    Configuration,
}

impl FeedErrorCode {
    /// Returns true if this error is transient and the fetch may be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network | Self::Timeout | Self::Http)
    }

    /// Returns a short identifier for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Http => "http",
            Self::InvalidFeed => "invalid_feed",
            Self::Configuration => "configuration",
        }
    }
}

impl fmt::Display for FeedErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while fetching or decoding a calendar feed.
#[derive(Debug, Error)]
pub struct FeedError {
    code: FeedErrorCode,
    message: String,
    source_name: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FeedError {
    /// Creates a new feed error with the given code and message.
    pub fn new(code: FeedErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source_name: None,
            source: None,
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::Network, message)
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::Timeout, message)
    }

    /// Creates an HTTP status error.
    pub fn http(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::Http, message)
    }

    /// Creates an invalid feed error.
    pub fn invalid_feed(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::InvalidFeed, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(FeedErrorCode::Configuration, message)
    }

    /// Sets the source (feed) name for this error.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Sets the underlying cause for this error.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(cause));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> FeedErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the feed name, if set.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Returns true if this error is transient and may be retried.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref name) = self.source_name {
            write!(f, "[{}] ", name)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
