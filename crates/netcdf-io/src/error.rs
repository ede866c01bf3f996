//! Error types for NetCDF operations.

use grid_common::GridError;
use thiserror::Error;

/// Result type for NetCDF operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF reading and writing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error reported by libnetcdf
    #[error("NetCDF library error: {0}")]
    Library(#[from] netcdf::Error),

    /// Missing required variable or dimension
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the remap layer
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl NetCdfError {
    /// Create a MissingData error.
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingData(what.into())
    }

    /// Create an InvalidFormat error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}

impl From<NetCdfError> for GridError {
    fn from(err: NetCdfError) -> Self {
        match err {
            NetCdfError::Grid(inner) => inner,
            NetCdfError::IoError(e) => GridError::Io(e.to_string()),
            other => GridError::netcdf(other.to_string()),
        }
    }
}
