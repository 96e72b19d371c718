//! Error types for mail-polish.

/// Errors that stop the client from starting.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// A draft that cannot be submitted yet.
///
/// The `Display` text is the message shown to the user, so keep it short
/// and specific to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a valid sender email address")]
    InvalidSender,

    #[error("Please enter a valid recipient email address")]
    InvalidRecipient,

    #[error("Please enter a subject")]
    MissingSubject,

    #[error("Please enter an email body")]
    MissingBody,
}

/// Failures talking to the polish backend.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request to {endpoint} failed: {reason}")]
    Request { endpoint: String, reason: String },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Clipboard write errors.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Copy command failed: {0}")]
    CopyFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Theme persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Failed to read theme preference from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write theme preference to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for mail-polish.
pub type Result<T> = std::result::Result<T, Error>;
