//! Error types for the assistant relay
//!
//! This module defines the closed set of failure kinds the relay can
//! surface, using `thiserror` for ergonomic error handling. Each kind maps
//! onto exactly one HTTP status at the handler boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::assistant::RunStatus;

/// Main error type for relay operations
///
/// Every failure between receiving a chat message and returning the
/// assistant reply is one of these variants.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The caller supplied a missing, empty, or unparseable message
    #[error("Invalid request: {0}")]
    ClientInput(String),

    /// The remote assistant API could not be reached or rejected the call
    #[error("Assistant API unavailable: {0}")]
    RemoteUnavailable(String),

    /// The assistant run reached a terminal state other than `completed`
    #[error("Assistant run ended with status: {status}")]
    RunFailed {
        /// The terminal status reported by the remote API
        status: RunStatus,
    },

    /// Polling did not observe a terminal run status in time
    #[error("Assistant run did not finish within {waited_ms} ms ({attempts} status checks)")]
    Timeout {
        /// Time spent polling, in milliseconds
        waited_ms: u128,
        /// Number of status checks issued
        attempts: u32,
    },

    /// The remote API answered with a payload missing a required field
    #[error("Malformed assistant API response: {0}")]
    MalformedResponse(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RelayError {
    /// HTTP status reported to the caller for this error kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::ClientInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-friendly name of the error kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::ClientInput(_) => "client_input",
            RelayError::RemoteUnavailable(_) => "remote_unavailable",
            RelayError::RunFailed { .. } => "run_failed",
            RelayError::Timeout { .. } => "timeout",
            RelayError::MalformedResponse(_) => "malformed_response",
            RelayError::Config(_) => "config",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for startup and CLI code
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

/// Result type alias for the relay pipeline, where the error kind matters
pub type RelayResult<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_input_error_display() {
        let error = RelayError::ClientInput("message is required".to_string());
        assert_eq!(error.to_string(), "Invalid request: message is required");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_remote_unavailable_is_server_error() {
        let error = RelayError::RemoteUnavailable("connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "Assistant API unavailable: connection refused"
        );
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_run_failed_names_each_status() {
        let failed = RelayError::RunFailed {
            status: RunStatus::Failed,
        };
        let cancelled = RelayError::RunFailed {
            status: RunStatus::Cancelled,
        };
        let expired = RelayError::RunFailed {
            status: RunStatus::Expired,
        };
        assert_eq!(failed.to_string(), "Assistant run ended with status: failed");
        assert_eq!(
            cancelled.to_string(),
            "Assistant run ended with status: cancelled"
        );
        assert_eq!(
            expired.to_string(),
            "Assistant run ended with status: expired"
        );
    }

    #[test]
    fn test_timeout_error_display() {
        let error = RelayError::Timeout {
            waited_ms: 3000,
            attempts: 4,
        };
        let s = error.to_string();
        assert!(s.contains("3000 ms"));
        assert!(s.contains("4 status checks"));
        assert_eq!(error.kind(), "timeout");
    }

    #[test]
    fn test_malformed_response_display() {
        let error = RelayError::MalformedResponse("thread id missing".to_string());
        assert_eq!(
            error.to_string(),
            "Malformed assistant API response: thread id missing"
        );
    }

    #[tokio::test]
    async fn test_into_response_uses_error_body() {
        let response = RelayError::ClientInput("message is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Invalid request: message is required");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RelayError>();
    }
}
