//! Debt Summarizer API server
//!
//! Accepts a CSV upload of pairwise debts (`debtor,creditor,amount`),
//! validates and aggregates it with `debtsum-core`, and hands back download
//! links for the generated CSV and PDF summary reports.
//!
//! Endpoints:
//!
//! - `POST /api/v1/process-file` — multipart upload, field `file`
//! - `GET /api/v1/processed/:filename` — download a generated report
//! - `GET /processed_files/*` — static serving of generated reports
//! - `GET /health`

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_download, handle_health, handle_process_file};

/// Command-line arguments for the debt summarizer server
#[derive(Parser, Debug)]
#[command(name = "debtsum-api")]
#[command(about = "Debt summarizer: CSV upload in, CSV/PDF reports out")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5001")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Directory for generated report files
    #[arg(long, default_value = "processed_files")]
    output_dir: PathBuf,

    /// Directory where uploads are persisted before processing
    #[arg(long, default_value = "uploads")]
    upload_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Where generated reports land; injected into every renderer call
    pub output_dir: PathBuf,
    /// Where raw uploads are persisted
    pub upload_dir: PathBuf,
}

/// Build the router; split out from `main` so tests can drive it in-process.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/v1/process-file", post(handle_process_file))
        .route("/api/v1/processed/:filename", get(handle_download))
        .nest_service("/processed_files", ServeDir::new(&state.output_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting debtsum-api on {}:{}", args.host, args.port);

    let state = AppState {
        output_dir: args.output_dir.clone(),
        upload_dir: args.upload_dir.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Reports directory: {}", args.output_dir.display());

    axum::serve(listener, app).await?;

    Ok(())
}
