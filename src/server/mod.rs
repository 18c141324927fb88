//! Server module for slackline
//!
//! - `config`: configuration structures
//! - `loader`: configuration loading from files and environment

pub mod config;
mod loader;

pub use loader::load_config;

use crate::api::{self, EventsState};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Run the Events API webhook server until Ctrl+C or SIGTERM
pub async fn run() -> Result<()> {
    let config = load_config()?;

    if config.slack.verification_token.is_empty() {
        warn!("slack.verification_token is not set; every event will be rejected");
    }
    if config.slack.signing_secret.is_empty() {
        warn!("slack.signing_secret is not set; request signatures are not checked");
    }

    let state = Arc::new(EventsState::from_settings(&config.slack));
    let app = api::router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config
        .server
        .bind_addr()
        .parse()
        .context("Invalid server address")?;

    info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }
}
