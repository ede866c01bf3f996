//! Scatter per-cell values into a dense raster.

use grid_common::{GridError, GridResult, GridShape};
use tracing::{debug, warn};

use crate::{Raster, RemapStats, Remapped};

/// Scatter `values` into a `height × width` raster using `grid_ids` as flat indices.
///
/// `values[i]` is the value of cell `grid_ids[i]`, so both slices must have the
/// same length; a mismatch invalidates the whole mapping and is reported as
/// [`GridError::LengthMismatch`] without producing a raster. Cells not named by
/// an in-range gridID hold `fill_value`. Out-of-range gridIDs are skipped one by
/// one. When a gridID repeats, the later value wins.
pub fn scatter_variable(
    grid_ids: &[i64],
    values: &[f64],
    shape: GridShape,
    fill_value: f64,
) -> GridResult<Remapped<f64>> {
    if grid_ids.len() != values.len() {
        return Err(GridError::LengthMismatch {
            grid_ids: grid_ids.len(),
            values: values.len(),
        });
    }

    let mut raster = Raster::filled(shape, fill_value);
    let mut written = vec![false; shape.len()];
    let mut stats = RemapStats {
        total: grid_ids.len(),
        ..Default::default()
    };

    let cells = raster.data_mut();
    for (&grid_id, &value) in grid_ids.iter().zip(values) {
        let Some(flat) = shape.flat_index(grid_id) else {
            stats.skipped_out_of_range += 1;
            continue;
        };
        if written[flat] {
            stats.duplicates += 1;
        }
        written[flat] = true;
        cells[flat] = value;
        stats.placed += 1;
    }

    if stats.has_skipped() {
        warn!(
            skipped = stats.skipped_out_of_range,
            cells = shape.len(),
            "gridIDs outside the domain were ignored while scattering values"
        );
    }
    debug!(placed = stats.placed, "Scattered variable values");

    Ok(Remapped { raster, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_example() {
        let out = scatter_variable(&[0, 4], &[10.0, 20.0], GridShape::new(2, 3), f64::NAN).unwrap();
        let rows = out.raster.to_rows();
        assert_eq!(rows[0][0], 10.0);
        assert_eq!(rows[1][1], 20.0);
        assert_eq!(out.raster.count_where(f64::is_nan), 4);
    }

    #[test]
    fn test_length_mismatch_is_config_error() {
        let err = scatter_variable(&[0, 4], &[10.0], GridShape::new(2, 3), f64::NAN).unwrap_err();
        assert!(matches!(
            err,
            GridError::LengthMismatch { grid_ids: 2, values: 1 }
        ));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_custom_fill_value() {
        let out = scatter_variable(&[1], &[3.5], GridShape::new(1, 3), -9999.0).unwrap();
        assert_eq!(out.raster.data(), &[-9999.0, 3.5, -9999.0]);
    }

    #[test]
    fn test_out_of_range_skipped_per_entry() {
        let out = scatter_variable(&[7, 0, -3], &[1.0, 2.0, 3.0], GridShape::new(2, 2), 0.0).unwrap();
        assert_eq!(out.raster.data(), &[2.0, 0.0, 0.0, 0.0]);
        assert_eq!(out.stats.skipped_out_of_range, 2);
        assert_eq!(out.stats.placed, 1);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let out = scatter_variable(&[1, 1], &[1.0, 2.0], GridShape::new(1, 2), 0.0).unwrap();
        assert_eq!(out.raster.get(0, 1), Some(2.0));
        assert_eq!(out.stats.duplicates, 1);
    }
}
