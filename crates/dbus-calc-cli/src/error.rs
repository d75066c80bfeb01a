//! Error types for the CLI

use dbus_calc::core::CalcError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Client library error (transport, reply, configuration)
    #[error(transparent)]
    Calc(#[from] CalcError),

    /// Async runtime could not be started
    #[error("Runtime error: {message}")]
    Runtime {
        /// Error message
        message: String,
    },

    /// Output could not be written
    #[error("Output error: {message}")]
    Output {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a runtime error
    #[must_use]
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }

    /// Create an output error
    #[must_use]
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}
