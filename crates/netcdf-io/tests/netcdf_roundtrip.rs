//! Round trips through real NetCDF files written to a temp directory.

use std::path::Path;

use grid_common::{ErrorClass, GridError};
use grid_remap::{build_active_mask, scatter_variable};
use netcdf_io::{
    read_aoi_grid_ids, read_domain_cells, subset_surfdata, AoiGridIdFile, DataSource, MaskSource,
    MaskVariables, NetCdfError, SubsetOptions,
};
use test_utils::domains::TINY;
use test_utils::netcdf_files::{
    write_data_file, write_domain_file, write_mask_file, write_surfdata_file, FixtureVar,
};
use test_utils::{assert_approx_eq, temp_test_dir};

// ============================================================================
// Mask + data sources
// ============================================================================

#[test]
fn test_mask_source_drops_fill_ids() {
    let dir = temp_test_dir();
    let path = dir.path().join("mask.nc");
    write_mask_file(&path, &TINY.x(), &TINY.y(), &[0, -9999, 4], Some(-9999)).unwrap();

    let mask = MaskSource::open(&path, &MaskVariables::default()).unwrap();
    assert_eq!(mask.grid_ids(), &[0, 4]);
    assert_eq!(mask.shape().height, 2);
    assert_eq!(mask.shape().width, 3);
    assert_eq!(mask.domain().x, TINY.x());
}

#[test]
fn test_mask_source_custom_names_missing() {
    let dir = temp_test_dir();
    let path = dir.path().join("mask.nc");
    write_mask_file(&path, &TINY.x(), &TINY.y(), &[0, 4], None).unwrap();

    let vars = MaskVariables {
        grid_id: "cell_id".to_string(),
        ..Default::default()
    };
    let err = MaskSource::open(&path, &vars).unwrap_err();
    assert!(matches!(err, NetCdfError::MissingData(_)));
}

#[test]
fn test_mask_and_data_end_to_end() {
    let dir = temp_test_dir();
    let mask_path = dir.path().join("mask.nc");
    let data_path = dir.path().join("data.nc");
    write_mask_file(&mask_path, &TINY.x(), &TINY.y(), &[0, 4], None).unwrap();

    let dims_1d = [("gridcell", 2)];
    let dims_3d = [("time", 2), ("lndgrid", 1), ("gridcell", 2)];
    write_data_file(
        &data_path,
        &[
            FixtureVar::new("GPP", &dims_1d, vec![10.0, 20.0]),
            FixtureVar::new("TLAI", &dims_3d, vec![1.0, 2.0, 3.0, 4.0]),
        ],
    )
    .unwrap();

    let mask = MaskSource::open(&mask_path, &MaskVariables::default()).unwrap();
    let data = DataSource::open(&data_path).unwrap();

    let active = build_active_mask(mask.grid_ids(), mask.shape());
    assert_eq!(active.raster.to_rows(), vec![vec![1, 0, 0], vec![0, 1, 0]]);

    let gpp = data.variable("GPP").unwrap().cell_values(None).unwrap();
    let out = scatter_variable(mask.grid_ids(), &gpp, mask.shape(), f64::NAN).unwrap();
    assert_approx_eq!(out.raster.get(0, 0).unwrap(), 10.0, 1e-6);
    assert_approx_eq!(out.raster.get(1, 1).unwrap(), 20.0, 1e-6);
    assert_eq!(out.raster.count_where(f64::is_nan), 4);

    let tlai = data.variable("TLAI").unwrap();
    assert_eq!(tlai.time_steps(), Some(2));
    let step1 = tlai.cell_values(Some(1)).unwrap();
    assert_eq!(step1, vec![3.0, 4.0]);

    let mut names = data.variable_names();
    names.sort();
    assert_eq!(names, vec!["GPP", "TLAI"]);
}

#[test]
fn test_data_source_fill_values_are_compressed() {
    let dir = temp_test_dir();
    let path = dir.path().join("data.nc");
    let dims = [("gridcell", 3)];
    write_data_file(
        &path,
        &[FixtureVar::new("FSDS", &dims, vec![5.0, -999.0, 7.0]).with_fill(-999.0)],
    )
    .unwrap();

    let data = DataSource::open(&path).unwrap();
    let values = data.variable("FSDS").unwrap().cell_values(None).unwrap();
    assert_eq!(values, vec![5.0, 7.0]);
}

#[test]
fn test_unknown_variable_is_lookup_error() {
    let dir = temp_test_dir();
    let path = dir.path().join("data.nc");
    let dims = [("gridcell", 1)];
    write_data_file(&path, &[FixtureVar::new("GPP", &dims, vec![1.0])]).unwrap();

    let data = DataSource::open(&path).unwrap();
    let err = data.variable("NOPE").unwrap_err();
    assert!(matches!(err, GridError::VariableNotFound(_)));
    assert_eq!(err.class(), ErrorClass::Lookup);
}

#[test]
fn test_four_dimensional_variable_rejected_on_use() {
    let dir = temp_test_dir();
    let path = dir.path().join("data.nc");
    let dims = [("a", 1), ("b", 1), ("c", 1), ("gridcell", 2)];
    write_data_file(&path, &[FixtureVar::new("SOIL", &dims, vec![1.0, 2.0])]).unwrap();

    let data = DataSource::open(&path).unwrap();
    let err = data.variable("SOIL").unwrap().cell_values(None).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Dimensionality);
}

// ============================================================================
// AOI gridID files
// ============================================================================

#[test]
fn test_domain_cells_flatten_nj() {
    let dir = temp_test_dir();
    let path = dir.path().join("domain.lnd.test.nc");
    write_domain_file(&path, &[-84.0, -83.5], &[35.0, 35.5], &[3, 9]).unwrap();

    let cells = read_domain_cells(&path).unwrap();
    assert_eq!(cells.grid_ids, vec![3, 9]);
    assert_eq!(cells.xc, vec![-84.0, -83.5]);
    assert_eq!(cells.yc, vec![35.0, 35.5]);
}

#[test]
fn test_write_then_read_aoi_grid_ids() {
    let dir = temp_test_dir();
    let mut meta = AoiGridIdFile::new("TN", "TESSFA2");
    meta.stamp = "240827".to_string();

    let path = meta.write(dir.path(), &[11, 42, 7]).unwrap();
    assert!(path.ends_with("TN_gridID.c240827.nc"));

    // Overwrites an existing file
    let path = meta.write(dir.path(), &[11, 42]).unwrap();
    let ids = read_aoi_grid_ids(&path).unwrap();
    assert_eq!(ids, vec![11, 42]);

    let file = netcdf::open(&path).unwrap();
    let var = file.variable("gridID").unwrap();
    let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
    assert_eq!(dims, vec!["nj", "ni"]);
    assert!(var.attribute("description").is_some());
    assert!(file.attribute("title").is_some());
}

#[test]
fn test_read_aoi_grid_ids_from_csv() {
    let dir = temp_test_dir();
    let path = dir.path().join("AKSP_gridID.csv");
    std::fs::write(&path, "gridID\n5\n 8 \n\n13.0\n").unwrap();

    assert_eq!(read_aoi_grid_ids(&path).unwrap(), vec![5, 8, 13]);
}

#[test]
fn test_read_aoi_grid_ids_bad_csv_row() {
    let dir = temp_test_dir();
    let path = dir.path().join("AKSP_gridID.csv");
    std::fs::write(&path, "gridID\n5\nseven\n").unwrap();

    let err = read_aoi_grid_ids(&path).unwrap_err();
    assert!(err.to_string().contains("line 3"));
}

// ============================================================================
// Surface data subset
// ============================================================================

fn surfdata_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("surfdata.test.1d.nc");
    write_surfdata_file(&path, &[100, 101, 102, 103]).unwrap();
    path
}

#[test]
fn test_subset_surfdata_gathers_gridcell_variables() {
    let dir = temp_test_dir();
    let source = surfdata_fixture(dir.path());

    let mut options = SubsetOptions::new("AOI", "test.1d");
    options.stamp = "240101".to_string();
    let report = subset_surfdata(&source, dir.path(), &[103, 101, 999], &options).unwrap();

    assert!(report.path.ends_with("AOI_surfdata.test.1d.c240101.nc"));
    assert_eq!(report.cells, 2);
    assert_eq!(report.missing, vec![999]);
    assert!(report.gathered.contains(&"AREA".to_string()));
    assert!(report.copied.contains(&"natpft".to_string()));

    let out = netcdf::open(&report.path).unwrap();
    assert_eq!(out.dimension("gridcell").unwrap().len(), 2);
    assert_eq!(out.dimension("natpft").unwrap().len(), 2);

    // Source order is kept: 101 before 103
    let ids: Vec<i32> = out.variable("gridID").unwrap().get_values(..).unwrap();
    assert_eq!(ids, vec![101, 103]);

    let area = out.variable("AREA").unwrap();
    let values: Vec<f64> = area.get_values(..).unwrap();
    assert_eq!(values, vec![151.5, 154.5]);
    assert!(area.attribute("_FillValue").is_none());
    assert!(area.attribute("units").is_some());

    let pct: Vec<f64> = out.variable("PCT_NAT_PFT").unwrap().get_values(..).unwrap();
    assert_eq!(pct, vec![101.0, 103.0, 201.0, 203.0]);

    let lai: Vec<f32> = out.variable("MONTHLY_LAI").unwrap().get_values(..).unwrap();
    assert_eq!(lai, vec![101.0, 103.0, 111.0, 113.0, 121.0, 123.0, 131.0, 133.0]);

    let natpft: Vec<i32> = out.variable("natpft").unwrap().get_values(..).unwrap();
    assert_eq!(natpft, vec![0, 1]);

    assert!(out.attribute("source").is_some());
    assert!(out.attribute("title").is_some());
}

#[test]
fn test_subset_surfdata_rejects_disjoint_aoi() {
    let dir = temp_test_dir();
    let source = surfdata_fixture(dir.path());
    let options = SubsetOptions::new("AOI", "test.1d");

    let err = subset_surfdata(&source, dir.path(), &[1, 2, 3], &options).unwrap_err();
    assert!(matches!(err, NetCdfError::InvalidFormat(_)));
}
