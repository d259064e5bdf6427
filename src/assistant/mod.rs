//! Remote assistant API module
//!
//! This module contains the assistant API abstraction and the HTTP client
//! for the hosted assistants service.

pub mod base;
pub mod openai;

pub use base::{AssistantApi, Role, RunStatus, ThreadMessage};
pub use openai::OpenAiAssistantClient;

use crate::config::AssistantConfig;
use crate::error::Result;
use std::sync::Arc;

/// Create the assistant API client described by the configuration
///
/// # Errors
///
/// Returns error if the HTTP client cannot be initialized
pub fn create_assistant_api(config: &AssistantConfig) -> Result<Arc<dyn AssistantApi>> {
    Ok(Arc::new(OpenAiAssistantClient::new(config.clone())?))
}
