//! Single-band Float64 GeoTIFF writer.
//!
//! Georeferencing is carried in the standard GeoTIFF tags:
//!
//! | Tag   | Name              | Content                                  |
//! |-------|-------------------|------------------------------------------|
//! | 33550 | ModelPixelScale   | `[xres, yres, 0]`                        |
//! | 33922 | ModelTiepoint     | `[0, 0, 0, origin_x, origin_y, 0]`       |
//! | 34735 | GeoKeyDirectory   | model type, raster type and CRS code     |
//! | 42113 | GDAL_NODATA       | nodata value as ASCII                    |

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use grid_common::CrsCode;
use grid_remap::Raster;
use tiff::encoder::{colortype, Compression, DeflateLevel, TiffEncoder};
use tiff::tags::Tag;
use tracing::{debug, info};

use crate::error::{GeoTiffError, GeoTiffResult};
use crate::transform::GeoTransform;

pub const TAG_MODEL_PIXEL_SCALE: u16 = 33550;
pub const TAG_MODEL_TIEPOINT: u16 = 33922;
pub const TAG_GEO_KEY_DIRECTORY: u16 = 34735;
pub const TAG_GDAL_NODATA: u16 = 42113;

// GeoKey IDs and values
const GT_MODEL_TYPE: u16 = 1024;
const GT_RASTER_TYPE: u16 = 1025;
const GEOGRAPHIC_TYPE: u16 = 2048;
const PROJECTED_CS_TYPE: u16 = 3072;
const MODEL_TYPE_PROJECTED: u16 = 1;
const MODEL_TYPE_GEOGRAPHIC: u16 = 2;
const RASTER_PIXEL_IS_AREA: u16 = 1;

/// GeoKeyDirectory entries for a CRS: a header followed by
/// `(key, location, count, value)` quadruples.
pub fn geo_key_directory(crs: CrsCode) -> Vec<u16> {
    let (model_type, crs_key) = if crs.is_geographic() {
        (MODEL_TYPE_GEOGRAPHIC, GEOGRAPHIC_TYPE)
    } else {
        (MODEL_TYPE_PROJECTED, PROJECTED_CS_TYPE)
    };

    vec![
        1, 1, 0, 3, // version 1.1.0, three keys
        GT_MODEL_TYPE, 0, 1, model_type,
        GT_RASTER_TYPE, 0, 1, RASTER_PIXEL_IS_AREA,
        crs_key, 0, 1, crs.code(),
    ]
}

/// GDAL_NODATA text for a fill value. NaN is written as `nan`.
pub fn nodata_text(nodata: f64) -> String {
    if nodata.is_nan() {
        "nan".to_string()
    } else {
        nodata.to_string()
    }
}

/// Write `raster` as a single-band Float64 GeoTIFF.
///
/// Row 0 of the raster is written as the top image row, which the transform
/// places at `origin_y`. Callers holding south-up data flip it first.
pub fn write_geotiff(
    path: &Path,
    raster: &Raster<f64>,
    transform: &GeoTransform,
    crs: CrsCode,
    nodata: Option<f64>,
) -> GeoTiffResult<()> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Err(GeoTiffError::invalid(format!(
            "cannot write an empty {}x{} raster to {}",
            height,
            width,
            path.display()
        )));
    }
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(GeoTiffError::invalid(format!(
                "raster {}x{} exceeds TIFF limits",
                height, width
            )))
        }
    };

    debug!(
        path = %path.display(),
        width,
        height,
        origin_x = transform.origin_x,
        origin_y = transform.origin_y,
        crs = crs.code(),
        "Encoding GeoTIFF"
    );

    let mut out = BufWriter::new(File::create(path)?);
    {
        let mut tiff = TiffEncoder::new(&mut out)?
            .with_compression(Compression::Deflate(DeflateLevel::Balanced));
        let mut image = tiff.new_image::<colortype::Gray64Float>(w, h)?;

        let scale = transform.pixel_scale();
        let tiepoint = transform.tiepoint();
        let keys = geo_key_directory(crs);
        image
            .encoder()
            .write_tag(Tag::from_u16_exhaustive(TAG_MODEL_PIXEL_SCALE), &scale[..])?;
        image
            .encoder()
            .write_tag(Tag::from_u16_exhaustive(TAG_MODEL_TIEPOINT), &tiepoint[..])?;
        image
            .encoder()
            .write_tag(Tag::from_u16_exhaustive(TAG_GEO_KEY_DIRECTORY), &keys[..])?;
        if let Some(nodata) = nodata {
            let text = nodata_text(nodata);
            image
                .encoder()
                .write_tag(Tag::from_u16_exhaustive(TAG_GDAL_NODATA), text.as_str())?;
        }

        image.write_data(raster.data())?;
    }
    out.flush()?;

    info!(path = %path.display(), width, height, "Wrote GeoTIFF");
    Ok(())
}
