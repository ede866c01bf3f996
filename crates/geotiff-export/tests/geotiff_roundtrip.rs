//! Write rasters and decode them back with the tiff decoder.

use std::fs::File;

use geotiff_export::{write_geotiff, GeoTiffError, GeoTransform};
use grid_common::{CrsCode, GridShape};
use grid_remap::{scatter_variable, Raster};
use test_utils::domains::TINY;
use test_utils::temp_test_dir;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

fn decode(path: &std::path::Path) -> Decoder<File> {
    Decoder::new(File::open(path).unwrap()).unwrap()
}

#[test]
fn test_scattered_raster_roundtrip() {
    let dir = temp_test_dir();
    let path = dir.path().join("GPP.tif");
    let shape = GridShape::new(TINY.height, TINY.width);
    let out = scatter_variable(&[0, 4], &[10.0, 20.0], shape, f64::NAN).unwrap();
    let flipped = out.raster.flip_rows();
    let transform = GeoTransform::from_coords(&TINY.x(), &TINY.y(), true).unwrap();

    write_geotiff(&path, &flipped, &transform, CrsCode::Epsg4326, Some(f64::NAN)).unwrap();

    let mut decoder = decode(&path);
    assert_eq!(decoder.dimensions().unwrap(), (3, 2));

    let scale = decoder.get_tag_f64_vec(Tag::from_u16_exhaustive(33550)).unwrap();
    assert_eq!(scale, vec![0.5, 0.5, 0.0]);
    let tiepoint = decoder.get_tag_f64_vec(Tag::from_u16_exhaustive(33922)).unwrap();
    assert_eq!(tiepoint, vec![0.0, 0.0, 0.0, -90.25, 35.75, 0.0]);
    let nodata = decoder.get_tag_ascii_string(Tag::from_u16_exhaustive(42113)).unwrap();
    assert_eq!(nodata.trim_end_matches('\0'), "nan");

    let DecodingResult::F64(data) = decoder.read_image().unwrap() else {
        panic!("expected Float64 samples");
    };
    assert_eq!(data.len(), 6);
    // Top image row is the northern (last) domain row
    assert!(data[0].is_nan());
    assert_eq!(data[1], 20.0);
    assert_eq!(data[3], 10.0);
    assert_eq!(data.iter().filter(|v| v.is_nan()).count(), 4);
}

#[test]
fn test_no_nodata_tag_when_unset() {
    let dir = temp_test_dir();
    let path = dir.path().join("mask.tif");
    let raster = Raster::from_vec(GridShape::new(2, 2), vec![1.0, 0.0, 0.0, 1.0]).unwrap();
    let transform = GeoTransform::new(0.0, 2.0, 1.0, 1.0);

    write_geotiff(&path, &raster, &transform, CrsCode::Epsg3857, None).unwrap();

    let mut decoder = decode(&path);
    assert!(decoder.get_tag_ascii_string(Tag::from_u16_exhaustive(42113)).is_err());
    let DecodingResult::F64(data) = decoder.read_image().unwrap() else {
        panic!("expected Float64 samples");
    };
    assert_eq!(data, vec![1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_empty_raster_rejected() {
    let dir = temp_test_dir();
    let raster = Raster::filled(GridShape::new(0, 3), 0.0);
    let transform = GeoTransform::new(0.0, 0.0, 1.0, 1.0);

    let err = write_geotiff(
        &dir.path().join("empty.tif"),
        &raster,
        &transform,
        CrsCode::Epsg4326,
        None,
    )
    .unwrap_err();
    assert!(matches!(err, GeoTiffError::InvalidRaster(_)));
}
