//! Assistant relay - HTTP relay to a hosted conversational assistant
//!
//! Main entry point for the relay binary.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use assistant_relay::cli::{Cli, Commands};
use assistant_relay::commands;
use assistant_relay::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose, cli.json_logs);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    config.validate()?;

    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!("Starting assistant relay server");
            commands::serve::run_serve(config).await?;
            Ok(())
        }
        Commands::Ask { message } => {
            tracing::info!("Relaying a single message");
            commands::ask::run_ask(config, message).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool, json_logs: bool) {
    let default_filter = if verbose {
        "assistant_relay=debug,tower_http=debug"
    } else {
        "assistant_relay=info,tower_http=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
