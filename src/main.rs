//! Notification-configuration API server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ request id ─▶ trace ─▶ metrics ─▶ access gate ─▶ timeout/limit
//!                                                                    │
//!                                                                    ▼
//!                                            /api/v1 routes ◀── bearer auth
//!                                                 │
//!                                                 ▼
//!                                    DbManager ─▶ MemoryStore (+ JSON snapshot)
//! ```

use std::path::PathBuf;

use clap::Parser;

use feed_api::config::load_config;
use feed_api::lifecycle::{startup, Shutdown};
use feed_api::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "feed-api")]
#[command(about = "Notification-configuration API server", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_tracing(&config.observability.log_level)?;

    tracing::info!("feed-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        access_gate = config.access.enabled,
        trusted_proxies = config.access.trusted_proxies.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let (server, listener) = startup::prepare(config).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
