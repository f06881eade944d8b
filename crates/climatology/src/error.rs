//! Error types for climatology loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a climatology.
#[derive(Error, Debug)]
pub enum ClimatologyError {
    /// Failed to read a table file.
    #[error("failed to read climatology file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed table document.
    #[error("failed to parse climatology file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Table shape or axes are inconsistent.
    #[error("invalid climatology table: {0}")]
    InvalidTable(String),
}

impl ClimatologyError {
    /// Create an InvalidTable error.
    pub fn invalid_table(msg: impl Into<String>) -> Self {
        Self::InvalidTable(msg.into())
    }
}

/// Result type for climatology operations.
pub type Result<T> = std::result::Result<T, ClimatologyError>;
