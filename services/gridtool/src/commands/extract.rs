//! `mask`, `extract` and `variables` commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grid_remap::{build_active_mask, sub_window, RemapStats};
use netcdf_io::{DataSource, MaskSource};
use serde::Serialize;
use tracing::info;

use crate::config::{ExportConfig, GridtoolConfig};
use crate::pipeline::{Pipeline, RunSummary};
use crate::requests::RequestList;
use crate::sink::GeoTiffSink;

fn open_mask(config: &GridtoolConfig, path: &Path) -> Result<MaskSource> {
    let mask = MaskSource::open(path, &config.mask)
        .with_context(|| format!("failed to load mask file {}", path.display()))?;
    info!(
        path = %path.display(),
        height = mask.shape().height,
        width = mask.shape().width,
        active = mask.grid_ids().len(),
        "Loaded mask"
    );
    Ok(mask)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

#[derive(Debug, Clone, Serialize)]
pub struct MaskSummary {
    pub path: PathBuf,
    pub active_cells: usize,
    pub stats: RemapStats,
}

/// Build the active-cell mask and write it as `mask.tif`.
pub fn run_mask(config: &GridtoolConfig, mask_path: &Path, out_dir: &Path) -> Result<MaskSummary> {
    let mask = open_mask(config, mask_path)?;
    let active = build_active_mask(mask.grid_ids(), mask.shape());
    let active_cells = active.raster.count_where(|v| v == 1);

    let (rows, cols) = config.window.resolve(mask.shape().height, mask.shape().width);
    let window = sub_window(
        &active.raster.map(f64::from),
        &mask.domain().x,
        &mask.domain().y,
        rows,
        cols,
        config.remap.window_policy,
    )?;

    ensure_dir(out_dir)?;
    let export = ExportConfig {
        write_nodata: false,
        ..config.export
    };
    let sink = GeoTiffSink::new(out_dir, export, 0.0).with_domain_resolution(mask.domain());
    let path = out_dir.join("mask.tif");
    sink.write_raster(&path, &window.raster, &window.x, &window.y)?;

    Ok(MaskSummary {
        path,
        active_cells,
        stats: active.stats,
    })
}

/// Export each requested variable as `{variable}.tif`.
pub fn run_extract(
    config: &GridtoolConfig,
    mask_path: &Path,
    data_path: &Path,
    out_dir: &Path,
    requests: &RequestList,
) -> Result<RunSummary> {
    let mask = open_mask(config, mask_path)?;
    let data = DataSource::open(data_path)
        .with_context(|| format!("failed to open data file {}", data_path.display()))?;

    ensure_dir(out_dir)?;
    let pipeline = Pipeline::new(mask.domain().clone(), mask.grid_ids().to_vec(), config.clone());
    let mut sink = GeoTiffSink::new(out_dir, config.export, config.remap.fill_value)
        .with_domain_resolution(mask.domain());

    let summary = pipeline
        .run(&data, &mut sink, requests)
        .context("export aborted")?;
    Ok(summary)
}

/// List the variables of a data file.
pub fn run_variables(data_path: &Path) -> Result<Vec<String>> {
    let data = DataSource::open(data_path)
        .with_context(|| format!("failed to open data file {}", data_path.display()))?;
    let mut names = data.variable_names();
    names.sort();
    Ok(names)
}
