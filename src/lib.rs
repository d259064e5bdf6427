//! Assistant relay - HTTP relay to a hosted conversational assistant
//!
//! Accepts a chat message over HTTP, drives a remote assistant thread to
//! completion, and returns the assistant's reply.
//!
//! # Architecture
//!
//! - `assistant`: remote assistant API abstraction and HTTP client
//! - `relay`: the per-request thread/run/poll/reply pipeline
//! - `server`: axum routes and handlers
//! - `commands`: CLI command handlers
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use assistant_relay::{ChatRelay, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let relay = ChatRelay::from_config(&config)?;
//!     let reply = relay.relay(Some("Hello!")).await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod assistant;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod relay;
pub mod server;

// Re-export commonly used types
pub use assistant::{AssistantApi, OpenAiAssistantClient, RunStatus};
pub use config::Config;
pub use error::{RelayError, RelayResult, Result};
pub use relay::{ChatRelay, PollPolicy};

#[cfg(test)]
pub mod test_utils;
