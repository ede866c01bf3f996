//! Affine georeferencing for north-up rasters.

use grid_common::{BoundingBox, GridDomain};
use serde::Serialize;

use crate::error::{GeoTiffError, GeoTiffResult};

/// Upper-left origin and pixel size of a north-up raster.
///
/// `pixel_height` is positive; rows run southwards from `origin_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub origin_y: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        }
    }

    /// Build the transform for ascending cell-centre coordinates, deriving
    /// the resolution from the first two entries of each axis.
    ///
    /// Needs at least two coordinates per axis. Use [`Self::with_resolution`]
    /// for a window cut from a larger domain.
    pub fn from_coords(x: &[f64], y: &[f64], pixel_center_offset: bool) -> GeoTiffResult<Self> {
        let domain = GridDomain::new(x.to_vec(), y.to_vec());
        let (Some(xres), Some(yres)) = (domain.x_resolution(), domain.y_resolution()) else {
            return Err(GeoTiffError::invalid(format!(
                "need at least 2 coordinates per axis to derive resolution, got {} x and {} y",
                x.len(),
                y.len()
            )));
        };
        Self::with_resolution(x, y, xres, yres, pixel_center_offset)
    }

    /// Build the transform for ascending cell-centre coordinates with a known
    /// resolution, typically the full domain's.
    ///
    /// The origin is `(x[0], y[last])` of the coordinates passed in. For a
    /// window that is the window's own top row, not the top row of the full
    /// domain, so a row-limited window is placed where its cells are. With
    /// `pixel_center_offset` the origin moves half a cell outwards to
    /// `(x[0] - xres/2, y[last] + yres/2)`, so the tiepoint sits on the corner
    /// of the top-left cell.
    pub fn with_resolution(
        x: &[f64],
        y: &[f64],
        xres: f64,
        yres: f64,
        pixel_center_offset: bool,
    ) -> GeoTiffResult<Self> {
        let (Some(&left), Some(&top)) = (x.first(), y.last()) else {
            return Err(GeoTiffError::invalid(format!(
                "empty coordinate axis, got {} x and {} y",
                x.len(),
                y.len()
            )));
        };
        if !(xres.is_finite() && yres.is_finite()) || xres == 0.0 || yres == 0.0 {
            return Err(GeoTiffError::invalid(format!(
                "degenerate resolution {} x {}",
                xres, yres
            )));
        }

        let xres = xres.abs();
        let yres = yres.abs();

        Ok(if pixel_center_offset {
            Self::new(left - xres / 2.0, top + yres / 2.0, xres, yres)
        } else {
            Self::new(left, top, xres, yres)
        })
    }

    /// Extent covered by `width × height` pixels.
    pub fn bounds(&self, width: usize, height: usize) -> BoundingBox {
        BoundingBox::new(
            self.origin_x,
            self.origin_y - self.pixel_height * height as f64,
            self.origin_x + self.pixel_width * width as f64,
            self.origin_y,
        )
    }

    /// ModelPixelScale tag values.
    pub(crate) fn pixel_scale(&self) -> [f64; 3] {
        [self.pixel_width, self.pixel_height, 0.0]
    }

    /// ModelTiepoint tag values: raster (0, 0) maps to the origin.
    pub(crate) fn tiepoint(&self) -> [f64; 6] {
        [0.0, 0.0, 0.0, self.origin_x, self.origin_y, 0.0]
    }
}
