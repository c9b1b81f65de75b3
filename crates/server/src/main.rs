//! `sealdrop` — server binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the tracing subscriber.
//! 3. Generate the process-lifetime RSA key pair (blocking, one-time).
//! 4. Create the storage directory if absent.
//! 5. Build the Axum router and start serving.
//!
//! Any failure in steps 1–4 aborts before the listener is bound: the service
//! never serves without a key pair and a writable storage directory.

mod config;
mod keys;
mod pipeline;
mod server;
mod telemetry;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use config::Config;
use keys::ServerKeyPair;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_tracing(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        "sealdrop starting"
    );

    // -----------------------------------------------------------------------
    // 3. Key pair — one per process lifetime, never persisted
    // -----------------------------------------------------------------------
    info!(bits = cfg.rsa_key_bits, "generating RSA key pair");
    let keys = ServerKeyPair::generate(cfg.rsa_key_bits)
        .context("RSA key pair generation failed; refusing to start")?;
    info!("key pair ready; previous wrapped keys are now invalid");

    // -----------------------------------------------------------------------
    // 4. Storage directory
    // -----------------------------------------------------------------------
    let storage_dir = PathBuf::from(&cfg.storage_dir);
    tokio::fs::create_dir_all(&storage_dir)
        .await
        .with_context(|| format!("failed to create storage directory {}", cfg.storage_dir))?;

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(Arc::new(keys), storage_dir);
    let router = server::router::build(state, cfg.max_body_bytes);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
