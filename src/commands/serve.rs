//! `serve` command: run the HTTP relay

use crate::config::Config;
use crate::error::Result;
use crate::relay::ChatRelay;
use crate::server;

/// Start the HTTP relay with the given configuration
///
/// # Errors
///
/// Returns error if the assistant client cannot be created or the server
/// fails to bind
pub async fn run_serve(config: Config) -> Result<()> {
    let relay = ChatRelay::from_config(&config)?;
    tracing::info!(
        interval_ms = relay.poll_policy().interval.as_millis() as u64,
        max_wait_secs = relay.poll_policy().max_wait.as_secs(),
        "Run polling configured"
    );
    server::serve(&config.server, relay).await
}
