//! Command handlers for the CLI
//!
//! - `serve` - run the HTTP relay
//! - `ask`   - relay one message from the terminal

pub mod ask;
pub mod serve;
