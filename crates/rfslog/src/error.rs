//! Error types for rfslog.
//!
//! Only fatal conditions live here. Unknown field ids and out-of-range state
//! values are diagnostics reported through `tracing` and counted in the
//! [`DecodeSummary`](crate::decoder::DecodeSummary); they never abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rfslog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Stream Errors ===
    /// The stream ended part-way through a frame.
    #[error(
        "truncated frame at byte offset {offset}: {available} of {len} bytes available",
        len = crate::frame::FRAME_LEN
    )]
    Truncated {
        /// Byte offset of the first byte of the partial frame.
        offset: u64,
        /// Number of bytes that were present before end of stream.
        available: usize,
    },

    /// Reading the dump or writing a log failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === File Errors ===
    /// Failed to open the dump file.
    #[error("failed to open input {path}: {source}")]
    InputOpen {
        /// Path to the dump file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create one of the output logs.
    #[error("failed to create output {path}: {source}")]
    OutputCreate {
        /// Path to the log file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the output directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for rfslog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from the frame stream itself
    /// (a partial frame or a failed read).
    #[must_use]
    pub fn is_stream_error(&self) -> bool {
        matches!(self, Self::Truncated { .. } | Self::Io(_))
    }
}
