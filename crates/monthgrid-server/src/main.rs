//! Server binary entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use monthgrid_core::{TracingConfig, TracingOutputFormat, init_tracing};
use monthgrid_server::{AppConfig, AppState, ServerResult, router};

#[derive(Debug, Parser)]
#[command(name = "monthgrid", version, about = "Month-view calendar grid server")]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, env = "MONTHGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind address (e.g. 127.0.0.1:8080).
    #[arg(short, long)]
    bind: Option<String>,

    /// Enable debug logging with human-readable output.
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ServerResult<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if cli.debug {
        config.server.debug = true;
    }

    let tracing_config = if config.server.debug {
        TracingConfig::default()
            .with_level(Level::DEBUG)
            .with_format(TracingOutputFormat::Compact)
    } else {
        TracingConfig::server()
    };
    init_tracing(tracing_config)?;

    let state = Arc::new(AppState::from_config(&config)?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!(
        bind = %config.server.bind,
        sources = config.calendar.sources.len(),
        timezone = %config.calendar.timezone,
        "monthgrid listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
