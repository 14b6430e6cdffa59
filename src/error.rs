//! Agentry Error Types
//!
//! Error handling for the completion client and its collaborators.

use std::fmt;

/// Main error type for agentry operations
#[derive(Debug)]
pub enum AgentryError {
    /// Configuration errors (invalid JSON, missing fields, empty message list)
    Config(String),

    /// The service answered with a non-success HTTP status
    Status { code: u16, message: String },

    /// HTTP request failed before a response was obtained
    Request(String),

    /// Response body did not match the expected shape
    Response(String),

    /// Streaming error (stream unavailable, transport fault mid-stream)
    Stream(String),

    /// Timeout
    Timeout(String),

    /// Generic internal error
    Internal(String),
}

impl AgentryError {
    /// Build a status error from a code and an optional service-supplied message.
    ///
    /// Falls back to a generic templated message when the service body carried
    /// nothing usable.
    pub fn status(code: u16, message: Option<String>) -> Self {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => format!("API request failed: {}", code),
        };
        AgentryError::Status { code, message }
    }
}

impl fmt::Display for AgentryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentryError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AgentryError::Status { code, message } => {
                write!(f, "Service error (HTTP {}): {}", code, message)
            }
            AgentryError::Request(msg) => write!(f, "Request failed: {}", msg),
            AgentryError::Response(msg) => write!(f, "Response error: {}", msg),
            AgentryError::Stream(msg) => write!(f, "Streaming error: {}", msg),
            AgentryError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            AgentryError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AgentryError {}

impl From<reqwest::Error> for AgentryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AgentryError::Timeout(err.to_string())
        } else if err.is_connect() {
            AgentryError::Request(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            AgentryError::Response(format!("Failed to decode response: {}", err))
        } else {
            AgentryError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AgentryError {
    fn from(err: serde_json::Error) -> Self {
        AgentryError::Response(format!("JSON parsing error: {}", err))
    }
}

impl From<std::io::Error> for AgentryError {
    fn from(err: std::io::Error) -> Self {
        AgentryError::Config(format!("IO error: {}", err))
    }
}

/// Result type alias for agentry operations
pub type Result<T> = std::result::Result<T, AgentryError>;
