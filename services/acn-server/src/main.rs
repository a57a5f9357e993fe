//! ACN API Server
//!
//! ```bash
//! # Start with default settings
//! acn-server
//!
//! # Custom port and ledger file
//! acn-server --port 8080 --data /var/lib/acn/ledger.json
//!
//! # Environment overrides
//! ACN__SERVER__PORT=8080 acn-server
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use acn_ledger::CreditLedger;
use acn_server::{create_router, AppState, ServerConfig};
use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Agent Credit Network API server
#[derive(Parser, Debug)]
#[command(name = "acn-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "ACN_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "ACN_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "ACN_PORT")]
    port: Option<u16>,

    /// JSON ledger file
    #[arg(long, env = "ACN_DATA_FILE")]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(data) = args.data {
        config.ledger.data_file = data;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_file = %config.ledger.data_file.display(),
        "Starting ACN API Server"
    );

    let ledger = CreditLedger::open_file(&config.ledger.data_file)
        .await
        .with_context(|| format!("Failed to open ledger {}", config.ledger.data_file.display()))?;

    let addr = config.server.socket_addr()?;
    let shutdown_timeout = config.server.shutdown_timeout();
    let app = create_router(Arc::new(AppState::new(ledger, config)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }

    tracing::info!(timeout_secs = timeout.as_secs(), "Draining in-flight requests");
    tokio::time::sleep(timeout).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["acn-server", "--port", "8080", "--data", "/tmp/l.json"]);
        assert_eq!(args.port, Some(8080));
        assert_eq!(args.data, Some(PathBuf::from("/tmp/l.json")));
        assert!(args.host.is_none());
    }
}
