//! Sparse gridID remapping.
//!
//! Land-surface model output is stored "compressed": one value per active
//! cell, aligned with a list of gridIDs that give each cell's flattened
//! row-major position in a 2D domain. This crate turns that representation
//! back into dense rasters:
//!
//! - **Active mask**: which cells of the domain carry data
//! - **Scatter**: place per-cell values into a `height × width` raster
//! - **Sub-window**: crop a raster and its coordinates for export
//! - **AOI selection**: pick gridIDs by polygon or by intersection
//!
//! # Architecture
//!
//! ```text
//! MaskSource (x, y, gridID)
//!      │
//!      ├─► build_active_mask(gridID, shape)          ─► Raster<u8>
//!      │
//! DataSource ─► VariableArray::cell_values(time)
//!      │
//!      └─► scatter_variable(gridID, values, shape)   ─► Raster<f64>
//!               │
//!               ▼
//!          sub_window(raster, x, y, rows, cols)      ─► Window<f64>
//!               │
//!               ▼
//!          GeoTIFF writer / renderer
//! ```
//!
//! # Example
//!
//! ```
//! use grid_common::GridShape;
//! use grid_remap::{build_active_mask, scatter_variable};
//!
//! let shape = GridShape::new(2, 3);
//! let mask = build_active_mask(&[0, 4], shape);
//! assert_eq!(mask.raster.to_rows(), vec![vec![1, 0, 0], vec![0, 1, 0]]);
//!
//! let scattered = scatter_variable(&[0, 4], &[10.0, 20.0], shape, f64::NAN).unwrap();
//! assert_eq!(scattered.raster.get(1, 1), Some(20.0));
//! ```

pub mod aoi;
pub mod config;
pub mod mask;
pub mod raster;
pub mod scatter;
pub mod stats;
pub mod variable;
pub mod window;

// Re-export commonly used types at crate root
pub use aoi::{select_cell_indices, select_ids_in_area, AoiParseError, AreaOfInterest, CellSelection};
pub use config::RemapConfig;
pub use grid_common::{GridError, GridResult, GridShape};
pub use mask::build_active_mask;
pub use raster::Raster;
pub use scatter::scatter_variable;
pub use stats::{RemapStats, Remapped};
pub use variable::{Dimensionality, VariableArray};
pub use window::{sub_window, Window, WindowPolicy};
