//! garage-server - HTTP API for the my-garage vehicle inventory.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use garage_core::DocumentStore;
use garage_server::{AnyStore, Inventory, ServerConfig, router};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    init_logging(config.verbose, config.json_logs);

    let store = AnyStore::open(&config.store, &config.database)
        .context("Failed to open document store")?;
    info!(backend = store.kind(), store = %config.store, db = %config.database, "Using document store");

    // The API still comes up when the store is unreachable; requests fail
    // individually until it is back.
    match store.ensure_database().await {
        Ok(true) => info!(db = %config.database, "Database created"),
        Ok(false) => info!(db = %config.database, "Database already exists"),
        Err(e) => warn!(db = %config.database, error = %e, "Could not create database"),
    }

    let app = router(Arc::new(Inventory::new(store)));

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server is running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
