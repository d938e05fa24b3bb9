//! Error types for trinav
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors with clear error chains.

use std::io;

/// Message shown when a failed response carries no usable `error` field
pub const GENERIC_API_FAILURE: &str = "An error occurred while fetching data";

/// Main error type for the trinav application
#[derive(Debug, thiserror::Error)]
pub enum TrinavError {
    /// Explorer API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Command parsing errors
    #[error("Command error: {0}")]
    Command(#[from] CommandError),
}

/// Explorer API request errors
///
/// `Display` is the user-facing message: the error banner shows it verbatim.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (refused, DNS, timeout)
    #[error("{0}")]
    Network(String),

    /// Non-2xx response
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        /// Parsed error body, when it was JSON
        payload: Option<serde_json::Value>,
    },

    /// 2xx response whose body was not the expected JSON
    #[error("Invalid response from server: {0}")]
    Decode(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl ApiError {
    /// Build a status error from a raw failure body.
    ///
    /// The body's `error` field becomes the message; anything else falls back
    /// to [`GENERIC_API_FAILURE`].
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        let payload = serde_json::from_slice::<serde_json::Value>(body).ok();
        let message = payload
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| GENERIC_API_FAILURE.to_string());
        ApiError::Status {
            status,
            message,
            payload,
        }
    }

    /// The `message` field of a JSON error payload, if there was one
    pub fn payload_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                payload: Some(payload),
                ..
            } => payload.get("message").and_then(|m| m.as_str()),
            _ => None,
        }
    }
}

/// Configuration loading/parsing errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Home directory not found
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// Config file could not be read
    #[error("Configuration file not readable: {0}")]
    NotFound(String),

    /// Failed to parse TOML
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Environment name not recognised
    #[error("Unknown environment '{0}' (expected development or production)")]
    UnknownEnvironment(String),
}

/// Command parsing errors
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Unknown command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// Command takes no arguments but got some
    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Specialized Result type for trinav operations
pub type Result<T> = std::result::Result<T, TrinavError>;

/// Specialized Result type for API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Specialized Result type for config operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized Result type for command operations
pub type CommandResult<T> = std::result::Result<T, CommandError>;
