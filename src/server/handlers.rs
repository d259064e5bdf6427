//! HTTP handlers for the relay endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::RelayError;

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Successful response of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Liveness check
pub async fn home() -> &'static str {
    "Assistant relay is running"
}

/// Relay a chat message to the assistant
///
/// Body rejections (malformed JSON, wrong content type) are reported as
/// client errors in the same `{ "error": ... }` shape as relay failures.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, RelayError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected chat request body: {}", rejection.body_text());
        RelayError::ClientInput(rejection.body_text())
    })?;

    match state.relay.relay(request.message.as_deref()).await {
        Ok(reply) => Ok(Json(ChatResponse { reply })),
        Err(err) => {
            match &err {
                RelayError::ClientInput(_) => {
                    tracing::warn!(kind = err.kind(), "Chat request rejected: {}", err)
                }
                _ => tracing::error!(kind = err.kind(), "Chat relay failed: {}", err),
            }
            Err(err)
        }
    }
}
