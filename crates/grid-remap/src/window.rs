//! Rectangular sub-windows of a raster and its coordinates.

use grid_common::{GridError, GridResult, IndexRange};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Raster;

/// What to do when a requested window extends past the raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowPolicy {
    /// Fail with `GridError::WindowOutOfBounds`.
    #[default]
    Reject,
    /// Shrink the window to the raster and log the adjustment.
    Clamp,
}

impl std::str::FromStr for WindowPolicy {
    type Err = GridError;

    /// Parse from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            other => Err(GridError::config(format!(
                "unknown window policy '{}', expected 'reject' or 'clamp'",
                other
            ))),
        }
    }
}

/// A cropped raster with matching coordinate vectors.
#[derive(Debug, Clone)]
pub struct Window<T> {
    pub raster: Raster<T>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Rows actually selected (1-based, inclusive)
    pub rows: IndexRange,
    /// Columns actually selected (1-based, inclusive)
    pub cols: IndexRange,
}

/// Crop `raster` to `rows × cols` (inclusive, 1-based) and slice `x`/`y` alike.
///
/// `x` must have one entry per column and `y` one per row. Empty or inverted
/// ranges are always rejected; ranges past the raster edge are rejected or
/// clamped according to `policy`.
pub fn sub_window<T: Copy>(
    raster: &Raster<T>,
    x: &[f64],
    y: &[f64],
    rows: IndexRange,
    cols: IndexRange,
    policy: WindowPolicy,
) -> GridResult<Window<T>> {
    if x.len() != raster.width() || y.len() != raster.height() {
        return Err(GridError::config(format!(
            "coordinate vectors ({} x, {} y) do not match raster {}x{}",
            x.len(),
            y.len(),
            raster.height(),
            raster.width()
        )));
    }

    let rows = resolve("row", rows, raster.height(), policy)?;
    let cols = resolve("column", cols, raster.width(), policy)?;

    let row_span = rows.to_zero_based();
    let col_span = cols.to_zero_based();

    Ok(Window {
        raster: raster.crop(row_span.clone(), col_span.clone()),
        x: x[col_span].to_vec(),
        y: y[row_span].to_vec(),
        rows,
        cols,
    })
}

fn resolve(
    axis: &'static str,
    range: IndexRange,
    len: usize,
    policy: WindowPolicy,
) -> GridResult<IndexRange> {
    let out_of_bounds = || GridError::WindowOutOfBounds {
        axis,
        min: range.min,
        max: range.max,
        len,
    };

    if range.max < range.min {
        return Err(out_of_bounds());
    }
    if range.fits(len) {
        return Ok(range);
    }

    match policy {
        WindowPolicy::Reject => Err(out_of_bounds()),
        WindowPolicy::Clamp => {
            let clamped = range.clamp_to(len).ok_or_else(out_of_bounds)?;
            warn!(
                axis,
                requested = %range,
                clamped = %clamped,
                "Window clamped to raster bounds"
            );
            Ok(clamped)
        }
    }
}
