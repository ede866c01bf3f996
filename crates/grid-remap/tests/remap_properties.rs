//! End-to-end properties of mask, scatter and window over synthetic domains.

use grid_common::{GridError, IndexRange};
use grid_remap::{
    build_active_mask, scatter_variable, select_cell_indices, select_ids_in_area, sub_window,
    AreaOfInterest, GridShape, RemapConfig, VariableArray, WindowPolicy,
};
use test_utils::domains::{SMALL, TINY};
use test_utils::{assert_approx_eq, checkerboard_grid_ids, interleaved, value_for_id, values_for_ids};

fn shape_of(domain: test_utils::domains::DomainSpec) -> GridShape {
    GridShape::new(domain.height, domain.width)
}

// ============================================================================
// Mask
// ============================================================================

#[test]
fn test_mask_is_one_exactly_at_grid_ids() {
    let shape = shape_of(SMALL);
    let ids = interleaved(&checkerboard_grid_ids(SMALL.height, SMALL.width));
    let mask = build_active_mask(&ids, shape);

    for flat in 0..shape.len() {
        let expected = u8::from(ids.contains(&(flat as i64)));
        assert_eq!(mask.raster.get_flat(flat), Some(expected), "cell {}", flat);
    }
}

#[test]
fn test_mask_idempotent_under_duplicates() {
    let shape = shape_of(SMALL);
    let ids = checkerboard_grid_ids(SMALL.height, SMALL.width);
    let mut doubled = ids.clone();
    doubled.extend(&ids);

    let once = build_active_mask(&ids, shape);
    let twice = build_active_mask(&doubled, shape);
    assert_eq!(once.raster, twice.raster);
    assert_eq!(twice.stats.duplicates, ids.len());
}

// ============================================================================
// Scatter
// ============================================================================

#[test]
fn test_scatter_places_each_value_at_its_grid_id() {
    let shape = shape_of(SMALL);
    let ids = interleaved(&checkerboard_grid_ids(SMALL.height, SMALL.width));
    let values = values_for_ids(&ids);

    let out = scatter_variable(&ids, &values, shape, f64::NAN).unwrap();
    for flat in 0..shape.len() {
        let cell = out.raster.get_flat(flat).unwrap();
        if ids.contains(&(flat as i64)) {
            assert_approx_eq!(cell, value_for_id(flat as i64), 1e-12);
        } else {
            assert!(cell.is_nan(), "cell {} should be NaN", flat);
        }
    }
}

#[test]
fn test_scatter_example_values() {
    let out = scatter_variable(&[0, 4], &[10.0, 20.0], shape_of(TINY), f64::NAN).unwrap();
    let rows = out.raster.to_rows();
    assert_eq!(rows[0][0], 10.0);
    assert!(rows[0][1].is_nan() && rows[0][2].is_nan());
    assert!(rows[1][0].is_nan() && rows[1][2].is_nan());
    assert_eq!(rows[1][1], 20.0);
}

#[test]
fn test_scatter_rejects_misaligned_values() {
    let err = scatter_variable(&[0, 4], &[10.0], shape_of(TINY), f64::NAN).unwrap_err();
    assert!(matches!(err, GridError::LengthMismatch { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_out_of_range_ids_do_not_error() {
    let shape = shape_of(TINY);
    let ids = [0, 6, -1, 4, 1_000_000];
    let mask = build_active_mask(&ids, shape);
    assert_eq!(mask.raster.to_rows(), vec![vec![1, 0, 0], vec![0, 1, 0]]);
    assert_eq!(mask.stats.skipped_out_of_range, 3);

    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    let out = scatter_variable(&ids, &values, shape, -1.0).unwrap();
    assert_eq!(out.raster.data(), &[1.0, -1.0, -1.0, -1.0, 4.0, -1.0]);
}

// ============================================================================
// Time slices feeding scatter
// ============================================================================

#[test]
fn test_time_slice_then_scatter() {
    let ids = [0i64, 4];
    // 2 time steps x 2 cells
    let var = VariableArray::new("TSOI", vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    // Two axes are spatial, so the whole array is one step here.
    assert_eq!(var.cell_values(Some(9)).unwrap().len(), 4);

    let var = VariableArray::new("TSOI", vec![2, 1, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let step1 = var.cell_values(Some(1)).unwrap();
    let out = scatter_variable(&ids, &step1, shape_of(TINY), f64::NAN).unwrap();
    assert_eq!(out.raster.get(0, 0), Some(3.0));
    assert_eq!(out.raster.get(1, 1), Some(4.0));

    assert!(matches!(
        var.cell_values(Some(2)),
        Err(GridError::TimeStepOutOfRange { index: 2, steps: 2 })
    ));
}

#[test]
fn test_compressed_values_align_with_compressed_ids() {
    // Fill entries are dropped so the remaining values line up with gridIDs.
    let var = VariableArray::cells("FSDS", vec![5.0, -999.0, 7.0]).with_fill_value(Some(-999.0));
    let values = var.cell_values(None).unwrap();
    let out = scatter_variable(&[1, 5], &values, shape_of(TINY), f64::NAN).unwrap();
    assert_eq!(out.raster.get(0, 1), Some(5.0));
    assert_eq!(out.raster.get(1, 2), Some(7.0));
}

// ============================================================================
// Window
// ============================================================================

#[test]
fn test_full_window_is_identity() {
    let shape = shape_of(SMALL);
    let ids = checkerboard_grid_ids(SMALL.height, SMALL.width);
    let out = scatter_variable(&ids, &values_for_ids(&ids), shape, 0.0).unwrap();

    let window = sub_window(
        &out.raster,
        &SMALL.x(),
        &SMALL.y(),
        IndexRange::full(SMALL.height),
        IndexRange::full(SMALL.width),
        WindowPolicy::Reject,
    )
    .unwrap();

    assert_eq!(window.raster, out.raster);
    assert_eq!(window.x, SMALL.x());
    assert_eq!(window.y, SMALL.y());
}

#[test]
fn test_clamped_window_from_policy_name() {
    let policy: WindowPolicy = "Clamp".parse().unwrap();
    let config = RemapConfig {
        window_policy: policy,
        ..Default::default()
    };

    let out = build_active_mask(&[0], shape_of(TINY));
    let window = sub_window(
        &out.raster,
        &TINY.x(),
        &TINY.y(),
        IndexRange::new(1, 10),
        IndexRange::new(2, 3),
        config.window_policy,
    )
    .unwrap();
    assert_eq!(window.rows, IndexRange::new(1, 2));
    assert_eq!(window.raster.to_rows(), vec![vec![0, 0], vec![0, 0]]);
    assert_eq!(window.x, vec![-89.5, -89.0]);
}

// ============================================================================
// AOI selection
// ============================================================================

#[test]
fn test_aoi_selection_then_gather() {
    let ids = checkerboard_grid_ids(SMALL.height, SMALL.width);
    let (xc, yc) = SMALL.centres(&ids);

    // Covers columns 0..=1 and rows 0..=1 of SMALL
    let area = AreaOfInterest::from_wkt(
        "POLYGON((-84.1 34.9, -83.6 34.9, -83.6 35.4, -84.1 35.4, -84.1 34.9))",
    )
    .unwrap();
    let inside = select_ids_in_area(&ids, &xc, &yc, &area).unwrap();
    assert_eq!(inside, vec![0, 6]);

    let selection = select_cell_indices(&ids, &inside);
    let values = values_for_ids(&ids);
    let gathered = selection.gather_last_axis(&values, ids.len()).unwrap();
    assert_eq!(gathered, values_for_ids(&inside));
}
