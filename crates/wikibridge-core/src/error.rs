//! Error types for the publishing pipeline.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! This ensures composable error handling across crates.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all wikibridge operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File not found in the vault
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Invalid file or page path
    #[error("Invalid path: {reason}")]
    InvalidPath { reason: String },

    /// Transport-level failure (non-2xx status, unreachable host)
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    /// Error reported by the remote wiki itself
    #[error("Remote error: {message}")]
    Remote { message: String },

    /// Malformed JSON in a remote response
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// An image reference that could not be mapped to a vault file
    #[error("Unresolved image reference: {reference}")]
    Unresolved { reference: String },

    /// Generic unclassified error
    #[error("Error: {0}")]
    Other(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a transport error
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Error::Http {
            status,
            body: body.into(),
        }
    }

    /// Create a remote-reported error
    pub fn remote(message: impl Into<String>) -> Self {
        Error::Remote {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create an unresolved reference error
    pub fn unresolved(reference: impl Into<String>) -> Self {
        Error::Unresolved {
            reference: reference.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
