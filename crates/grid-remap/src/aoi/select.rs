//! GridID selection by polygon or by list.

use std::collections::HashSet;

use grid_common::{GridError, GridResult};
use tracing::{debug, warn};

use super::AreaOfInterest;

/// Keep the gridIDs whose cell centre `(xc[i], yc[i])` lies inside `area`.
///
/// The three slices are parallel. Cells with a NaN centre are never selected.
/// Order follows `grid_ids`.
pub fn select_ids_in_area(
    grid_ids: &[i64],
    xc: &[f64],
    yc: &[f64],
    area: &AreaOfInterest,
) -> GridResult<Vec<i64>> {
    if xc.len() != grid_ids.len() || yc.len() != grid_ids.len() {
        return Err(GridError::config(format!(
            "cell centres ({} x, {} y) do not align with {} gridIDs",
            xc.len(),
            yc.len(),
            grid_ids.len()
        )));
    }

    let bbox = area.bbox();
    let selected: Vec<i64> = grid_ids
        .iter()
        .zip(xc.iter().zip(yc))
        .filter(|&(_, (&x, &y))| {
            !x.is_nan()
                && !y.is_nan()
                && bbox.map_or(true, |b| b.contains_point(x, y))
                && area.contains_point(x, y)
        })
        .map(|(&id, _)| id)
        .collect();

    debug!(
        candidates = grid_ids.len(),
        selected = selected.len(),
        "Selected gridIDs in area of interest"
    );
    Ok(selected)
}

/// Positions of AOI gridIDs within a source gridID array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSelection {
    /// Indices into the source array, in source order
    pub indices: Vec<usize>,
    /// AOI gridIDs that do not occur in the source
    pub missing: Vec<i64>,
}

impl CellSelection {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Gather the selected cells along the last axis of a row-major array.
    ///
    /// `values` is viewed as `[outer..., axis_len]`; the result has shape
    /// `[outer..., self.len()]`. Works for any rank, including 1.
    pub fn gather_last_axis<T: Copy>(&self, values: &[T], axis_len: usize) -> GridResult<Vec<T>> {
        if axis_len == 0 || values.len() % axis_len != 0 {
            return Err(GridError::config(format!(
                "{} values cannot be split into rows of {}",
                values.len(),
                axis_len
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i >= axis_len) {
            return Err(GridError::config(format!(
                "cell index {} outside axis of length {}",
                bad, axis_len
            )));
        }

        let mut out = Vec::with_capacity(values.len() / axis_len * self.indices.len());
        for row in values.chunks_exact(axis_len) {
            out.extend(self.indices.iter().map(|&i| row[i]));
        }
        Ok(out)
    }
}

/// Find every position in `source_ids` whose gridID is in `aoi_ids`.
///
/// Indices come back in source order, so gathering with them keeps the
/// source's cell ordering.
pub fn select_cell_indices(source_ids: &[i64], aoi_ids: &[i64]) -> CellSelection {
    let wanted: HashSet<i64> = aoi_ids.iter().copied().collect();

    let indices: Vec<usize> = source_ids
        .iter()
        .enumerate()
        .filter(|(_, id)| wanted.contains(id))
        .map(|(i, _)| i)
        .collect();

    let present: HashSet<i64> = indices.iter().map(|&i| source_ids[i]).collect();
    let mut seen = HashSet::new();
    let missing: Vec<i64> = aoi_ids
        .iter()
        .copied()
        .filter(|id| !present.contains(id) && seen.insert(*id))
        .collect();

    if !missing.is_empty() {
        warn!(
            missing = missing.len(),
            requested = wanted.len(),
            "AOI gridIDs not found in source"
        );
    }

    CellSelection { indices, missing }
}
