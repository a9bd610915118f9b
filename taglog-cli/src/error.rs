//! CLI error handling with user-friendly messages.

use std::process;
use thiserror::Error;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug, Error)]
pub enum CliError {
    /// Failed to initialize the logging backend
    #[error("Failed to initialize logging in {dir}: {source}")]
    LoggingInit {
        dir: String,
        source: std::io::Error,
    },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        process::exit(1)
    }
}
