//! Error types for the session store.
//!
//! Every failure mode is an explicit variant returned to the immediate
//! caller; the store never logs-and-swallows internally.

use std::fmt;
use std::io;

/// The main error type for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// The requested session has no live entry: it either never existed
    /// or has already been reclaimed. Recoverable — re-create the session.
    NotFound(String),

    /// The key source could not produce a usable identifier.
    /// Not retried internally; the caller decides.
    KeyGeneration(String),

    /// The command received over the wire was invalid or malformed.
    InvalidCommand(String),

    /// Failed to parse the input buffer or protocol message.
    ParseError(String),

    /// An I/O error occurred (network, file, etc.).
    IoError(io::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(key) => write!(f, "session not found: '{}'", key),
            StoreError::KeyGeneration(reason) => write!(f, "key generation failed: {}", reason),
            StoreError::InvalidCommand(cmd) => write!(f, "invalid command: '{}'", cmd),
            StoreError::ParseError(msg) => write!(f, "parse error: {}", msg),
            StoreError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::IoError(err)
    }
}

/// A specialized Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
