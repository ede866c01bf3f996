//! `aoi-select` and `aoi-subset` commands.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use grid_remap::{select_ids_in_area, AreaOfInterest};
use netcdf_io::naming::aoi_name_from_file;
use netcdf_io::{
    read_aoi_grid_ids, read_domain_cells, subset_surfdata, AoiGridIdFile, SubsetOptions,
    SubsetReport,
};
use serde::Serialize;
use tracing::info;

use crate::config::GridtoolConfig;

#[derive(Debug, Clone, Serialize)]
pub struct AoiSelectSummary {
    pub path: PathBuf,
    pub domain_cells: usize,
    pub selected: usize,
}

/// Select the domain cells whose centres fall inside a WKT polygon and write
/// them as `<AOI>_gridID.c<yymmdd>.nc`.
pub fn run_aoi_select(
    config: &GridtoolConfig,
    domain_path: &Path,
    wkt: &str,
    aoi: &str,
    out_dir: &Path,
) -> Result<AoiSelectSummary> {
    let area = AreaOfInterest::from_wkt(wkt).context("invalid AOI polygon")?;
    let cells = read_domain_cells(domain_path)
        .with_context(|| format!("failed to read domain {}", domain_path.display()))?;

    let selected = select_ids_in_area(&cells.grid_ids, &cells.xc, &cells.yc, &area)?;
    info!(aoi, domain_cells = cells.len(), selected = selected.len(), "Selected AOI cells");

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;
    let path = AoiGridIdFile::new(aoi, config.aoi.domain_name.as_str())
        .write(out_dir, &selected)
        .context("failed to write AOI gridID file")?;

    Ok(AoiSelectSummary {
        path,
        domain_cells: cells.len(),
        selected: selected.len(),
    })
}

/// Subset a 1D surface-data file to the gridIDs listed in `points_path`.
///
/// The AOI name defaults to the part of the points file name before the first `_`.
pub fn run_aoi_subset(
    config: &GridtoolConfig,
    surfdata_path: &Path,
    points_path: &Path,
    aoi: Option<&str>,
    out_dir: &Path,
) -> Result<SubsetReport> {
    let aoi = match aoi {
        Some(name) => name.to_string(),
        None => aoi_name_from_file(points_path).ok_or_else(|| {
            anyhow!("cannot derive an AOI name from {}", points_path.display())
        })?,
    };

    let ids = read_aoi_grid_ids(points_path)
        .with_context(|| format!("failed to read AOI gridIDs from {}", points_path.display()))?;

    let mut options = SubsetOptions::new(aoi, config.aoi.surfdata_label.as_str());
    options.cell_dim = config.aoi.cell_dim.clone();

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;
    let report = subset_surfdata(surfdata_path, out_dir, &ids, &options)
        .with_context(|| format!("failed to subset {}", surfdata_path.display()))?;
    Ok(report)
}
