//! Command-line interface definition for the assistant relay
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to run the HTTP relay or relay a single message.

use clap::{Parser, Subcommand};

/// Assistant relay - forward chat messages to a hosted assistant
#[derive(Parser, Debug, Clone)]
#[command(name = "assistant-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP relay server
    Serve {
        /// Override the bind address from config
        #[arg(long)]
        host: Option<String>,

        /// Override the listening port from config
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Relay a single message to the assistant and print the reply
    Ask {
        /// Message to send
        message: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            json_logs: false,
            command: Commands::Serve {
                host: None,
                port: None,
            },
        }
    }
}
