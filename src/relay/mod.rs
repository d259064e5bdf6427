//! Chat relay pipeline
//!
//! Drives one remote assistant session per inbound message:
//!
//! 1. validate the message
//! 2. create a thread
//! 3. post the message as the user
//! 4. start a run bound to the configured assistant
//! 5. poll the run until it is terminal (bounded)
//! 6. join the assistant replies
//!
//! Nothing is cached between calls; each `relay` opens its own thread and
//! no state outlives the call. Only step 5 repeats, and only on the fixed
//! poll interval.

pub mod poll;
pub mod reply;

pub use poll::{poll_run, PollPolicy};
pub use reply::join_assistant_replies;

use crate::assistant::{self, AssistantApi, Role};
use crate::config::Config;
use crate::error::{RelayError, RelayResult, Result};
use std::sync::Arc;
use tracing::Instrument;

/// Check that a caller-supplied message is present and not blank
///
/// # Errors
///
/// Returns `RelayError::ClientInput` for a missing or whitespace-only message
pub fn validate_message(message: Option<&str>) -> RelayResult<&str> {
    match message {
        None => Err(RelayError::ClientInput("message is required".to_string())),
        Some(text) if text.trim().is_empty() => Err(RelayError::ClientInput(
            "message must not be empty".to_string(),
        )),
        Some(text) => Ok(text),
    }
}

/// Relays chat messages to a remote assistant
pub struct ChatRelay {
    api: Arc<dyn AssistantApi>,
    assistant_id: String,
    poll: PollPolicy,
}

impl ChatRelay {
    /// Create a relay over an existing assistant API client
    pub fn new(
        api: Arc<dyn AssistantApi>,
        assistant_id: impl Into<String>,
        poll: PollPolicy,
    ) -> Self {
        Self {
            api,
            assistant_id: assistant_id.into(),
            poll,
        }
    }

    /// Create a relay backed by the HTTP assistants client described by `config`
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be initialized
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = assistant::create_assistant_api(&config.assistant)?;
        Ok(Self::new(
            api,
            config.assistant.assistant_id.clone(),
            PollPolicy::from(&config.polling),
        ))
    }

    /// Polling policy in effect
    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll
    }

    /// Relay one message and return the assistant's joined reply
    ///
    /// # Errors
    ///
    /// - `ClientInput` when the message is missing or blank; no remote call is made
    /// - `RemoteUnavailable` / `MalformedResponse` when any remote step fails
    /// - `RunFailed` or `Timeout` from polling
    pub async fn relay(&self, message: Option<&str>) -> RelayResult<String> {
        let message = validate_message(message)?;

        let thread_id = self.api.create_thread().await?;
        let span = tracing::info_span!("relay", thread_id = %thread_id);

        self.run_on_thread(&thread_id, message)
            .instrument(span)
            .await
    }

    async fn run_on_thread(&self, thread_id: &str, message: &str) -> RelayResult<String> {
        tracing::debug!("Created thread");

        self.api
            .post_message(thread_id, Role::User, message)
            .await?;

        let run_id = self.api.create_run(thread_id, &self.assistant_id).await?;
        tracing::debug!(run_id = %run_id, "Started run");

        let attempts = poll_run(self.api.as_ref(), thread_id, &run_id, &self.poll).await?;

        let messages = self.api.list_messages(thread_id).await?;
        let reply = join_assistant_replies(&messages);

        tracing::info!(
            run_id = %run_id,
            attempts,
            reply_len = reply.len(),
            "Relayed assistant reply"
        );
        Ok(reply)
    }
}
