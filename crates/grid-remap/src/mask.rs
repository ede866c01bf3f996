//! Active-cell mask reconstruction.

use grid_common::GridShape;
use tracing::{debug, warn};

use crate::{Raster, RemapStats, Remapped};

/// Value of an active cell in the mask.
pub const ACTIVE: u8 = 1;
/// Value of an inactive cell in the mask.
pub const INACTIVE: u8 = 0;

/// Build the dense active-cell mask of a domain from its gridID list.
///
/// Every in-range gridID sets its cell to 1; all other cells stay 0.
/// GridIDs outside `0..height*width` are skipped and counted, and repeated
/// gridIDs have no further effect.
pub fn build_active_mask(grid_ids: &[i64], shape: GridShape) -> Remapped<u8> {
    let mut raster = Raster::filled(shape, INACTIVE);
    let mut stats = RemapStats {
        total: grid_ids.len(),
        ..Default::default()
    };

    let cells = raster.data_mut();
    for &grid_id in grid_ids {
        match shape.flat_index(grid_id) {
            Some(flat) => {
                if cells[flat] == ACTIVE {
                    stats.duplicates += 1;
                }
                cells[flat] = ACTIVE;
                stats.placed += 1;
            }
            None => stats.skipped_out_of_range += 1,
        }
    }

    if stats.has_skipped() {
        warn!(
            skipped = stats.skipped_out_of_range,
            cells = shape.len(),
            "gridIDs outside the domain were ignored while building the mask"
        );
    }
    debug!(
        active = stats.distinct_cells(),
        height = shape.height,
        width = shape.width,
        "Built active mask"
    );

    Remapped { raster, stats }
}
