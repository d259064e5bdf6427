//! Configuration management for the assistant relay
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::cli::{Cli, Commands};
use crate::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Main configuration structure
///
/// Holds everything the relay needs at startup: where to listen, how to
/// reach the assistant API, and how to poll runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Remote assistant API settings
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Run polling settings
    #[serde(default)]
    pub polling: PollingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Remote assistant API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// API credential sent as a bearer token
    #[serde(default)]
    pub api_key: String,

    /// Assistant that every run is bound to
    #[serde(default)]
    pub assistant_id: String,

    /// Base URL of the assistants API (useful for tests and local mocks)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Timeout for each individual API request (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            assistant_id: String::new(),
            api_base: default_api_base(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("AssistantConfig")
            .field("api_key", &api_key)
            .field("assistant_id", &self.assistant_id)
            .field("api_base", &self.api_base)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

/// Run polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Delay between run status checks (milliseconds)
    #[serde(default = "default_poll_interval")]
    pub interval_ms: u64,

    /// Maximum time to wait for a run to finish (seconds)
    #[serde(default = "default_max_wait")]
    pub max_wait_seconds: u64,
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_max_wait() -> u64 {
    120
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval(),
            max_wait_seconds: default_max_wait(),
        }
    }
}

/// Read and parse an environment variable, warning when it is malformed
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => {
            tracing::debug!("Env override: {}", name);
            Some(value)
        }
        Err(_) => {
            tracing::warn!("Invalid {}: {}", name, raw);
            None
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RelayError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| RelayError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Some(port) = env_parse::<u16>("PORT") {
            self.server.port = port;
        }

        if let Ok(host) = std::env::var("RELAY_HOST") {
            self.server.host = host;
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            self.assistant.api_key = api_key;
        }

        if let Ok(assistant_id) = std::env::var("ASSISTANT_ID") {
            self.assistant.assistant_id = assistant_id;
        }

        if let Ok(api_base) = std::env::var("RELAY_API_BASE") {
            self.assistant.api_base = api_base;
        }

        if let Some(timeout) = env_parse("RELAY_REQUEST_TIMEOUT_SECONDS") {
            self.assistant.request_timeout_seconds = timeout;
        }

        if let Some(interval) = env_parse("RELAY_POLL_INTERVAL_MS") {
            self.polling.interval_ms = interval;
        }

        if let Some(max_wait) = env_parse("RELAY_MAX_WAIT_SECONDS") {
            self.polling.max_wait_seconds = max_wait;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Commands::Serve { host, port } = &cli.command {
            if let Some(host) = host {
                self.server.host = host.clone();
            }
            if let Some(port) = port {
                self.server.port = *port;
            }
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.assistant.api_key.trim().is_empty() {
            return Err(RelayError::Config(
                "assistant.api_key is required (set OPENAI_API_KEY)".to_string(),
            )
            .into());
        }

        if self.assistant.assistant_id.trim().is_empty() {
            return Err(RelayError::Config(
                "assistant.assistant_id is required (set ASSISTANT_ID)".to_string(),
            )
            .into());
        }

        match url::Url::parse(&self.assistant.api_base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(RelayError::Config(format!(
                    "assistant.api_base must use http or https, got: {}",
                    url.scheme()
                ))
                .into());
            }
            Err(e) => {
                return Err(RelayError::Config(format!(
                    "assistant.api_base is not a valid URL: {}",
                    e
                ))
                .into());
            }
        }

        if self.assistant.request_timeout_seconds == 0 {
            return Err(RelayError::Config(
                "assistant.request_timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.server.port == 0 {
            return Err(
                RelayError::Config("server.port must be greater than 0".to_string()).into(),
            );
        }

        if self.polling.interval_ms == 0 {
            return Err(RelayError::Config(
                "polling.interval_ms must be greater than 0".to_string(),
            )
            .into());
        }

        if self.polling.max_wait_seconds == 0 {
            return Err(RelayError::Config(
                "polling.max_wait_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.polling.max_wait_seconds.saturating_mul(1000) < self.polling.interval_ms {
            return Err(RelayError::Config(
                "polling.max_wait_seconds must be at least one polling interval".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
