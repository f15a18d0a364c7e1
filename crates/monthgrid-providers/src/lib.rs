//! Calendar feed providers: fetching, ICS parsing and normalization.
//!
//! The pipeline is provider -> raw events -> normalized [`GridEvent`]s:
//!
//! - [`FeedProvider`] fetches one source's [`RawFeedEvent`]s
//! - [`parse_ics_content`] decodes iCalendar bodies
//! - [`normalize_events`] turns raw events into grid events, skipping
//!   unusable entries with an explicit [`SkipReason`]
//!
//! [`GridEvent`]: monthgrid_core::GridEvent

pub mod error;
pub mod ics;
pub mod normalize;
pub mod provider;
pub mod raw_event;
pub mod webcal;

pub use error::{FeedError, FeedErrorCode, FeedResult};
pub use ics::parse_ics_content;
pub use normalize::{SkipReason, normalize_event, normalize_events};
pub use provider::{BoxFuture, FeedProvider, StaticProvider};
pub use raw_event::{RawEventTime, RawFeedEvent};
pub use webcal::{DEFAULT_FETCH_TIMEOUT, WebcalProvider};
