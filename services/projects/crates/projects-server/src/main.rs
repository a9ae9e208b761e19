//! dlab projects server entry point.
//!
//! Initialises tracing, loads configuration from environment variables
//! (prefixed with `DLAB_PROJECTS_`), and serves the project resource API.

mod controller;
mod routes;
mod schema;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::controller::ProjectsController;
use crate::schema::SchemaValidator;

// ===================================================================
// Configuration
// ===================================================================

/// Server configuration loaded from environment variables via `envy`.
///
/// Each field maps to `DLAB_PROJECTS_<FIELD>`:
///   - `DLAB_PROJECTS_LISTEN_ADDR` (default `0.0.0.0:8080`)
#[derive(Debug, Deserialize)]
struct Config {
    /// Socket address to bind the HTTP server to.
    #[serde(default = "default_listen_addr")]
    listen_addr: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

// ===================================================================
// Entry point
// ===================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("dlab-projects-server starting");

    let config: Config = envy::prefixed("DLAB_PROJECTS_")
        .from_env()
        .context("failed to load config from DLAB_PROJECTS_* env vars")?;

    let schema = SchemaValidator::create_project()?;
    let router = routes::router(ProjectsController::new(schema));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!(listen_addr = %config.listen_addr, "projects server ready");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("dlab-projects-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl-C) for graceful shutdown.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
