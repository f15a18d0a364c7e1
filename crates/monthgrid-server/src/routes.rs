//! HTTP routes.
//!
//! `GET /` renders the month grid page; `year` and `month` query
//! parameters default to the current month in the configured timezone.
//! An out-of-range month is the only client error and answers 400 with
//! the reason.

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use tracing::info;

use monthgrid_core::{
    DEFAULT_CELL_SEPARATOR, MonthWindow, build_grid, relevant_events, render_cells,
};

use crate::fetch::fetch_all_sources;
use crate::html::render_page;
use crate::state::SharedState;

/// Query parameters for the calendar page.
#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// Year to render; defaults to the current year.
    pub year: Option<i32>,

    /// Month to render (1-12); defaults to the current month.
    pub month: Option<u32>,
}

/// Builds the application router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(calendar_page))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn calendar_page(
    State(state): State<SharedState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Html<String>, (StatusCode, String)> {
    let now = Utc::now().with_timezone(&state.tz);
    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or_else(|| now.month());

    let window = MonthWindow::for_month(year, month, state.tz)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let feeds = fetch_all_sources(&state.providers, state.tz).await;
    let relevant = relevant_events(&feeds, &window);
    let built = build_grid(&relevant, &window);
    let rendered = render_cells(&built.grid, DEFAULT_CELL_SEPARATOR);

    info!(
        year,
        month,
        sources = relevant.len(),
        max_cell_entries = built.max_cell_entries,
        "generated calendar page"
    );

    Ok(Html(render_page(
        &rendered,
        built.max_cell_entries,
        &state.style,
    )))
}

async fn healthz() -> &'static str {
    "ok"
}
