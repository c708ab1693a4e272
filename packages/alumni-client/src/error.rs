//! Typed errors for the alumni client library.
//!
//! Dispatch itself never fails: every request resolves to an
//! [`Outcome`](crate::dispatch::Outcome). These errors cover the parts that
//! can fail before or around a request (configuration, session persistence,
//! descriptor construction) and the raw transport layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by configuration, session persistence and request building.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration error (bad base URL, unreadable environment)
    #[error("config error: {0}")]
    Config(String),

    /// Session file could not be read or written
    #[error("session storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A request descriptor could not be built from the given parameters
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors produced by a [`Transport`](crate::transport::Transport).
///
/// The dispatcher folds these into `Outcome::TransportError`; they never
/// reach the caller directly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, TLS failure, timeout
    #[error("{0}")]
    Network(String),

    /// The response body could not be read
    #[error("{0}")]
    Body(String),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
