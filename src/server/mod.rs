//! HTTP surface of the relay
//!
//! Routes:
//!
//! - `GET /` - liveness text
//! - `POST /api/chat` - `{ "message": string }` to `{ "reply": string }`

pub mod handlers;

pub use handlers::{ChatRequest, ChatResponse};

use crate::config::ServerConfig;
use crate::error::{RelayError, Result};
use crate::relay::ChatRelay;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
///
/// Holds only the immutable relay; no per-conversation state is kept.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ChatRelay>,
}

impl AppState {
    pub fn new(relay: ChatRelay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/api/chat", post(handlers::chat))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the listener and serve until Ctrl-C
///
/// # Errors
///
/// Returns error if the address cannot be bound or the server fails
pub async fn serve(config: &ServerConfig, relay: ChatRelay) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RelayError::Config(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Assistant relay listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(relay)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Assistant relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining in-flight requests");
}
