//! Core types: month windows, events, relevance filtering, grid layout

pub mod error;
pub mod event;
pub mod filter;
pub mod grid;
pub mod render;
pub mod time;
pub mod tracing;

pub use error::{GridError, GridResult};
pub use event::GridEvent;
pub use filter::{SourceEvents, relevant_events};
pub use grid::{DayRow, MonthGrid, PopulatedGrid, build_grid};
pub use render::{DEFAULT_CELL_SEPARATOR, RenderedGrid, render_cells};
pub use time::MonthWindow;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};

#[cfg(test)]
mod golden_tests;
