//! GeoTIFF sink writing one `{variable}.tif` per request.

use std::path::{Path, PathBuf};

use geotiff_export::{write_geotiff, GeoTransform};
use grid_common::{GridDomain, GridResult};
use grid_remap::{Raster, Window};

use crate::config::ExportConfig;
use crate::pipeline::RasterSink;
use crate::requests::VariableRequest;

pub struct GeoTiffSink {
    out_dir: PathBuf,
    export: ExportConfig,
    fill_value: f64,
    /// Pixel size of the full domain, used for windows narrower than two cells
    resolution: Option<(f64, f64)>,
}

impl GeoTiffSink {
    pub fn new(out_dir: impl Into<PathBuf>, export: ExportConfig, fill_value: f64) -> Self {
        Self {
            out_dir: out_dir.into(),
            export,
            fill_value,
            resolution: None,
        }
    }

    /// Georeference windows with the resolution of the domain they were cut from.
    pub fn with_domain_resolution(mut self, domain: &GridDomain) -> Self {
        self.resolution = domain.x_resolution().zip(domain.y_resolution());
        self
    }

    /// Output path for a request. Requests with a time step get an `_tNNN`
    /// suffix so several steps of one variable can share a directory.
    pub fn path_for(&self, request: &VariableRequest) -> PathBuf {
        let file = match request.time_step {
            Some(t) if t > 0 => format!("{}_t{:03}.tif", request.name, t),
            _ => format!("{}.tif", request.name),
        };
        self.out_dir.join(file)
    }

    /// Write any raster with this sink's export settings.
    pub fn write_raster(
        &self,
        path: &Path,
        raster: &Raster<f64>,
        x: &[f64],
        y: &[f64],
    ) -> GridResult<()> {
        let offset = self.export.pixel_center_offset;
        let transform = match self.resolution {
            Some((xres, yres)) => GeoTransform::with_resolution(x, y, xres, yres, offset)?,
            None => GeoTransform::from_coords(x, y, offset)?,
        };
        let nodata = self.export.write_nodata.then_some(self.fill_value);

        if self.export.flip_rows {
            write_geotiff(path, &raster.flip_rows(), &transform, self.export.crs, nodata)?;
        } else {
            write_geotiff(path, raster, &transform, self.export.crs, nodata)?;
        }
        Ok(())
    }
}

impl RasterSink for GeoTiffSink {
    fn write(
        &mut self,
        request: &VariableRequest,
        window: &Window<f64>,
    ) -> GridResult<Option<PathBuf>> {
        let path = self.path_for(request);
        self.write_raster(&path, &window.raster, &window.x, &window.y)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for() {
        let sink = GeoTiffSink::new("/out", ExportConfig::default(), f64::NAN);
        assert_eq!(
            sink.path_for(&VariableRequest::new("TLAI")),
            PathBuf::from("/out/TLAI.tif")
        );
        assert_eq!(
            sink.path_for(&VariableRequest::at("TLAI", 0)),
            PathBuf::from("/out/TLAI.tif")
        );
        assert_eq!(
            sink.path_for(&VariableRequest::at("TLAI", 7)),
            PathBuf::from("/out/TLAI_t007.tif")
        );
    }
}
