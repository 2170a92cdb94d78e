//! Medbridge REST API entry point.
//!
//! Binary name: `medbridge`
//!
//! Parses CLI arguments, loads configuration from the data directory,
//! initializes the database and services, then serves the HTTP API.

mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use medbridge_infra::config::{load_config, resolve_data_dir};
use state::AppState;

#[derive(Parser)]
#[command(name = "medbridge", version, about = "Doctor-patient translation backend")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Data directory override (database, config, media).
    #[arg(long, env = "MEDBRIDGE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 => "medbridge=info,tower_http=info",
        1 => "medbridge=debug,tower_http=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let data_dir = cli.data_dir.unwrap_or_else(resolve_data_dir);
    tokio::fs::create_dir_all(&data_dir).await?;

    let config = load_config(&data_dir).await;
    tracing::info!(
        provider = %config.ai.provider,
        data_dir = %data_dir.display(),
        "starting medbridge"
    );

    let state = AppState::init(&data_dir, config).await?;
    let router = http::router::build_router(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
