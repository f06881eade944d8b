//! Error types for zonal-mean aggregation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building the grid or aggregating snapshots.
#[derive(Error, Debug)]
pub enum ZonalMeanError {
    /// The output grid would exceed a configured capacity.
    #[error("too many {what}: {requested} exceeds capacity {capacity}")]
    CapacityExceeded {
        what: &'static str,
        requested: usize,
        capacity: usize,
    },

    /// The output grid cannot be derived from the configuration and snapshot.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Failed to read the control file.
    #[error("failed to read control file {path}: {source}")]
    ControlFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No snapshot has been processed, so there is no grid to report.
    #[error("no usable meteorological snapshot")]
    NoSnapshot,

    /// A snapshot could not be read.
    #[error(transparent)]
    MetData(#[from] met_data::MetDataError),

    /// A climatology table could not be loaded.
    #[error(transparent)]
    Climatology(#[from] climatology::ClimatologyError),

    /// Failed to write the output table.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl ZonalMeanError {
    /// Create a CapacityExceeded error.
    pub fn capacity_exceeded(what: &'static str, requested: usize, capacity: usize) -> Self {
        Self::CapacityExceeded {
            what,
            requested,
            capacity,
        }
    }

    /// Create an InvalidGrid error.
    pub fn invalid_grid(msg: impl Into<String>) -> Self {
        Self::InvalidGrid(msg.into())
    }

    /// Create a ConfigError.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Result type for zonal-mean operations.
pub type Result<T> = std::result::Result<T, ZonalMeanError>;
