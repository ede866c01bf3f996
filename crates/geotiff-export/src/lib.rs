//! GeoTIFF export for remapped rasters.
//!
//! Writes a 2D `f64` raster as a single-band Float64 GeoTIFF using the pure
//! Rust `tiff` encoder, georeferenced by a [`GeoTransform`] and a CRS code.
//!
//! # Example
//!
//! ```ignore
//! use geotiff_export::{write_geotiff, GeoTransform};
//! use grid_common::CrsCode;
//!
//! let transform = GeoTransform::from_coords(&window.x, &window.y, true)?;
//! write_geotiff(&out_dir.join("TLAI.tif"), &window.raster.flip_rows(), &transform,
//!               CrsCode::Epsg4326, Some(f64::NAN))?;
//! ```

pub mod error;
pub mod transform;
pub mod writer;

pub use error::{GeoTiffError, GeoTiffResult};
pub use transform::GeoTransform;
pub use writer::{geo_key_directory, nodata_text, write_geotiff};
