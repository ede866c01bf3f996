//! Area-of-interest selection of gridIDs.
//!
//! Two ways of choosing a subset of cells:
//!
//! - by geometry: keep the gridIDs whose cell centre lies in a polygon
//! - by list: find where a list of gridIDs sits inside a source gridID array

mod polygon;
mod select;

pub use polygon::{AreaOfInterest, Polygon};
pub use select::{select_cell_indices, select_ids_in_area, CellSelection};

use thiserror::Error;

/// Errors from parsing an area of interest.
#[derive(Debug, Error)]
pub enum AoiParseError {
    #[error("Invalid WKT: {0}")]
    InvalidWkt(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

impl From<AoiParseError> for grid_common::GridError {
    fn from(err: AoiParseError) -> Self {
        grid_common::GridError::config(err.to_string())
    }
}
