//! Error types for the boundary pipeline and the client session.

use std::time::Duration;

/// Caller input failed a shape, presence or length rule.
///
/// The `Display` text is the exact message returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Body is not an object with a string `expression` field.
    #[error("Invalid request payload.")]
    InvalidPayload,

    /// Expression is empty after trimming.
    #[error("Expression is required.")]
    Required,

    /// Expression exceeds the length limit after trimming.
    #[error("Expression is too long.")]
    TooLong,
}

/// The evaluation engine failed.
///
/// Carries the engine's own message for diagnostics. It must never reach an
/// external caller; see [`crate::response`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelegationError {
    /// Engine raised an error.
    #[error("engine '{engine}' failed: {message}")]
    Engine {
        engine: &'static str,
        message: String,
    },

    /// Engine did not answer before the deadline.
    #[error("engine '{engine}' timed out after {timeout:?}")]
    Timeout {
        engine: &'static str,
        timeout: Duration,
    },

    /// Engine answered with blank text.
    #[error("engine '{engine}' returned an empty result")]
    EmptyResult { engine: &'static str },
}

impl DelegationError {
    pub fn engine(&self) -> &'static str {
        match self {
            Self::Engine { engine, .. }
            | Self::Timeout { engine, .. }
            | Self::EmptyResult { engine } => engine,
        }
    }
}

/// Durable history storage could not be read or written.
///
/// Always non-fatal: the in-memory log stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read '{key}': {message}")]
    Read { key: String, message: String },

    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },

    #[error("failed to encode history: {message}")]
    Encode { message: String },
}

/// The HTTP call to the boundary could not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("request timed out")]
    Timeout,

    #[error("invalid response body: {message}")]
    InvalidBody { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::InvalidBody {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}
