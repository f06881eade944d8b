//! Error types for snapshot loading.

use thiserror::Error;

/// Result type for met-data operations.
pub type MetDataResult<T> = Result<T, MetDataError>;

/// Errors that can occur while building or reading a snapshot.
#[derive(Error, Debug)]
pub enum MetDataError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required variable, dimension or axis
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format or inconsistent shapes
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Malformed JSON snapshot document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unparseable time stamp
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// File type not handled by any reader
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}

impl MetDataError {
    /// Create a MissingData error.
    pub fn missing(msg: impl Into<String>) -> Self {
        Self::MissingData(msg.into())
    }

    /// Create an InvalidFormat error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}
