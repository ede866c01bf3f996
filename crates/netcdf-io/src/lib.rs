//! NetCDF collaborators for gridID remapping.
//!
//! This crate reads and writes the NetCDF files around the remapper:
//!
//! - [`MaskSource`]: domain `x`/`y` coordinates and the active gridID list
//! - [`DataSource`]: compressed per-cell variables as [`grid_remap::VariableArray`]
//! - [`aoi`]: domain cell centres, AOI gridID lists (CSV or NetCDF) and the
//!   `<AOI>_gridID.c<yymmdd>.nc` writer
//! - [`surfdata`]: subsetting a 1D surface-data file to an AOI
//!
//! # Example
//!
//! ```ignore
//! use netcdf_io::{DataSource, MaskSource, MaskVariables};
//! use grid_remap::{build_active_mask, scatter_variable};
//!
//! let mask = MaskSource::open("mask.nc", &MaskVariables::default())?;
//! let data = DataSource::open("data.nc")?;
//!
//! let active = build_active_mask(mask.grid_ids(), mask.shape());
//! let values = data.variable("TLAI")?.cell_values(Some(0))?;
//! let raster = scatter_variable(mask.grid_ids(), &values, mask.shape(), f64::NAN)?;
//! ```

pub mod aoi;
pub mod data_source;
pub mod error;
pub mod mask_source;
pub mod naming;
pub mod native;
pub mod surfdata;

pub use aoi::{read_aoi_grid_ids, read_domain_cells, AoiGridIdFile, AoiPointsFormat, DomainCells};
pub use data_source::DataSource;
pub use error::{NetCdfError, NetCdfResult};
pub use mask_source::{MaskSource, MaskVariables};
pub use native::silence_hdf5_errors;
pub use surfdata::{subset_surfdata, SubsetOptions, SubsetReport};
