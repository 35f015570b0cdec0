use anyhow::{Context, Result};
use log::{info, warn};
use packwise_server::api;
use packwise_server::store::SqliteCatalogStore;
use std::env;
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting packwise-server");

    let addr = env::var("PACKWISE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let db_path = env::var("PACKWISE_DB").unwrap_or_else(|_| "packwise.sqlite".to_string());

    info!("Configuration:");
    info!("  PACKWISE_ADDR: {}", addr);
    info!("  PACKWISE_DB: {}", db_path);

    let store = SqliteCatalogStore::open(&db_path)
        .await
        .with_context(|| format!("failed to open catalog store at {db_path}"))?;

    if let Ok(seed_var) = env::var("PACKWISE_SEED_SIZES") {
        let sizes = parse_seed_sizes(&seed_var);
        info!("Seeding catalog with sizes: {:?}", sizes);
        store
            .seed(&sizes)
            .await
            .context("failed to seed catalog")?;
    }

    let router = api::router(Arc::new(store));

    let sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("Failed to register SIGTERM handler")?;
    let sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
        .context("Failed to register SIGINT handler")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("API server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(sigterm, sigint))
        .await
        .context("server error")?;

    info!("Server exiting gracefully");
    Ok(())
}

/// Comma-separated positive integers; anything else is skipped with a warning.
fn parse_seed_sizes(raw: &str) -> Vec<u64> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<u64>() {
            Ok(size) if size > 0 => Some(size),
            _ => {
                warn!("ignoring invalid seed size: {:?}", s);
                None
            }
        })
        .collect()
}

async fn shutdown_signal(mut sigterm: signal::unix::Signal, mut sigint: signal::unix::Signal) {
    tokio::select! {
        _ = sigterm.recv() => info!("Received SIGTERM, initiating graceful shutdown..."),
        _ = sigint.recv() => info!("Received SIGINT, initiating graceful shutdown..."),
    }
}
