//! HTTP server: config, concurrent feed fetching, HTML rendering.
//!
//! The request path is: parse query -> build the month window -> fetch
//! all configured sources concurrently -> relevance filter -> grid
//! builder -> cell renderer -> HTML page.

mod config;
mod error;
mod fetch;
mod html;
mod routes;
mod state;

pub use config::{AppConfig, CalendarSettings, ServerSettings, SourceSettings};
pub use error::{ServerError, ServerResult};
pub use fetch::fetch_all_sources;
pub use html::{PageStyle, render_page};
pub use routes::{CalendarQuery, router};
pub use state::{AppState, SharedState};
