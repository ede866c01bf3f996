//! Bookkeeping for remap passes.

use crate::Raster;
use serde::Serialize;

/// Counts gathered while placing gridIDs into a raster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemapStats {
    /// Number of gridIDs examined
    pub total: usize,
    /// Number written into the raster (duplicates included)
    pub placed: usize,
    /// Number dropped because they fell outside the domain
    pub skipped_out_of_range: usize,
    /// Number that hit a cell already written in this pass
    pub duplicates: usize,
}

impl RemapStats {
    /// Distinct cells that received a value.
    pub fn distinct_cells(&self) -> usize {
        self.placed - self.duplicates
    }

    pub fn has_skipped(&self) -> bool {
        self.skipped_out_of_range > 0
    }
}

/// A raster produced by a remap pass, together with its stats.
#[derive(Debug, Clone)]
pub struct Remapped<T> {
    pub raster: Raster<T>,
    pub stats: RemapStats,
}
