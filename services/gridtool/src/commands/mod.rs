//! Subcommand implementations.

pub mod aoi;
pub mod extract;

pub use aoi::{run_aoi_select, run_aoi_subset, AoiSelectSummary};
pub use extract::{run_extract, run_mask, run_variables, MaskSummary};
