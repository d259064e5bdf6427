//! Base assistant API trait and common types
//!
//! This module defines the `AssistantApi` trait that the relay drives,
//! along with the thread, run, and message types it exchanges with the
//! remote service. Identifiers are opaque strings owned by the remote API.

use crate::error::RelayResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a thread message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message written by the caller
    User,
    /// Message produced by the assistant
    Assistant,
    /// Any role the relay does not act on
    #[serde(other)]
    Other,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other => "other",
        }
    }
}

/// Lifecycle status of an assistant run
///
/// `Completed` is the only successful terminal state. `Failed`,
/// `Cancelled`, `Expired` and `Incomplete` are terminal failures; every
/// other status means the run is still progressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Completed,
    Failed,
    Cancelled,
    Expired,
    Incomplete,
    /// A status value this relay does not recognise; treated as non-terminal
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Returns true when no further progress will occur on the run
    ///
    /// # Examples
    ///
    /// ```
    /// use assistant_relay::assistant::RunStatus;
    ///
    /// assert!(RunStatus::Completed.is_terminal());
    /// assert!(RunStatus::Expired.is_terminal());
    /// assert!(!RunStatus::InProgress.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed
                | RunStatus::Failed
                | RunStatus::Cancelled
                | RunStatus::Expired
                | RunStatus::Incomplete
        )
    }

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Expired => "expired",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role-tagged message attached to a thread
///
/// `text` is the first text content of the message; it is `None` when the
/// remote API returned no text part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadMessage {
    pub role: Role,
    pub text: Option<String>,
}

impl ThreadMessage {
    /// Creates an assistant-authored message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: Some(text.into()),
        }
    }

    /// Creates a user-authored message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: Some(text.into()),
        }
    }
}

/// Remote assistant API operations used by the relay
///
/// Implementations must be safe to share across concurrent requests; the
/// relay never holds per-request state inside the client.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Opens a new conversation thread and returns its id
    async fn create_thread(&self) -> RelayResult<String>;

    /// Attaches a message to a thread
    async fn post_message(&self, thread_id: &str, role: Role, text: &str) -> RelayResult<()>;

    /// Starts a run of `assistant_id` against the thread and returns the run id
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> RelayResult<String>;

    /// Fetches the current status of a run
    async fn get_run_status(&self, thread_id: &str, run_id: &str) -> RelayResult<RunStatus>;

    /// Lists the thread's messages in the order the remote API returns them
    async fn list_messages(&self, thread_id: &str) -> RelayResult<Vec<ThreadMessage>>;
}
