//! Scratch locations for tests that write NetCDF or GeoTIFF files.

/// Fresh temporary directory, removed when the returned `TempDir` drops.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("gridid_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}
