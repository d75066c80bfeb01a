//! Core client model: operands, requests, responses and completion handling
//!
//! Nothing in here touches the network or a page. The transport and the page
//! are plugged in by [`crate::client::CalculatorClient`].

pub mod completion;
pub mod operand;
pub mod request;
pub mod response;

pub use completion::{on_ready_state_change, Decision, Outcome, ReadyState};
pub use operand::Operand;
pub use request::{CalculatorRequest, Method};
pub use response::{display_value, render_result, BridgeError, CalculatorResponse};

use thiserror::Error;

/// Result type for client operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors surfaced by the calculator client
///
/// Status codes other than 200 and 401 are not errors; they complete as
/// [`Outcome::Ignored`].
#[derive(Debug, Error)]
pub enum CalcError {
    /// The request never produced an HTTP response (connection refused, DNS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A 200 reply whose body is not a JSON object
    #[error("Malformed JSON response: {0}")]
    MalformedJson(String),

    /// A 200 reply without the expected result field
    #[error("Response has no `{0}` field")]
    MissingField(String),

    /// The configured base URL or endpoint cannot be turned into a request URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CalcError {
    /// Create a transport error
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for CalcError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidEndpoint(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_yaml_ng::Error> for CalcError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Config(err.to_string())
    }
}
