//! Error types for lexiconn
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DictError
pub type Result<T> = std::result::Result<T, DictError>;

/// Unified error type for lexiconn operations
#[derive(Debug, Error)]
pub enum DictError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error {code}: {message}")]
    Protocol { code: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl DictError {
    /// Build a protocol error from a fatal status line.
    pub fn protocol(code: u16, message: impl Into<String>) -> Self {
        DictError::Protocol {
            code,
            message: message.into(),
        }
    }

    /// True if this error came from a server status rather than the transport.
    pub fn is_protocol(&self) -> bool {
        matches!(self, DictError::Protocol { .. })
    }
}
