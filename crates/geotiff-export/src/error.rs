//! Error types for GeoTIFF export.

use grid_common::GridError;
use thiserror::Error;

/// Result type for GeoTIFF operations.
pub type GeoTiffResult<T> = Result<T, GeoTiffError>;

/// Error type for GeoTIFF operations.
#[derive(Debug, Error)]
pub enum GeoTiffError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF encoding error
    #[error("TIFF error: {0}")]
    Tiff(String),

    /// Raster or coordinates that cannot be georeferenced
    #[error("Invalid raster: {0}")]
    InvalidRaster(String),

    /// Error from the remap layer
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GeoTiffError {
    /// Create an InvalidRaster error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRaster(msg.into())
    }
}

impl From<tiff::TiffError> for GeoTiffError {
    fn from(e: tiff::TiffError) -> Self {
        GeoTiffError::Tiff(e.to_string())
    }
}

impl From<GeoTiffError> for GridError {
    fn from(err: GeoTiffError) -> Self {
        match err {
            GeoTiffError::Grid(e) => e,
            GeoTiffError::Io(e) => GridError::Io(e.to_string()),
            GeoTiffError::Tiff(msg) => GridError::Io(format!("GeoTIFF write failed: {}", msg)),
            GeoTiffError::InvalidRaster(msg) => GridError::Config(msg),
        }
    }
}
