//! `ask` command: relay one message from the terminal

use crate::config::Config;
use crate::error::Result;
use crate::relay::ChatRelay;

/// Relay `message` through the same pipeline the HTTP endpoint uses and
/// print the reply to stdout
///
/// # Errors
///
/// Returns the relay error when any step of the pipeline fails
pub async fn run_ask(config: Config, message: String) -> Result<()> {
    let relay = ChatRelay::from_config(&config)?;
    let reply = relay.relay(Some(message.as_str())).await?;
    println!("{}", reply);
    Ok(())
}
