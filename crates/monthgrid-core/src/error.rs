//! Core error types.

use thiserror::Error;

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur while building a month grid.
///
/// Almost nothing in the layout core is fatal: malformed events are
/// skipped, out-of-range day offsets are clipped, and empty sources are
/// dropped. The one thing the core refuses to do is build a grid for a
/// month that does not exist.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The requested year/month does not name a real calendar month.
    #[error("invalid month: {year}-{month:02} does not exist")]
    InvalidMonth { year: i32, month: u32 },
}
