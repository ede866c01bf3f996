//! gridtool configuration.
//!
//! Settings come from, in increasing precedence: built-in defaults, an
//! optional YAML file, `GRIDTOOL_*` environment variables (a `.env` file is
//! honoured), then command-line flags.

use std::path::Path;

use grid_common::{CrsCode, GridError, GridResult, IndexRange};
use grid_remap::RemapConfig;
use netcdf_io::MaskVariables;
use serde::{Deserialize, Serialize};

/// Top-level gridtool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridtoolConfig {
    /// Variable names in mask files
    pub mask: MaskVariables,

    /// Fill value and window policy
    pub remap: RemapConfig,

    /// Sub-window applied before export
    pub window: WindowConfig,

    /// GeoTIFF export settings
    pub export: ExportConfig,

    /// AOI file naming
    pub aoi: AoiConfig,
}

/// Rows and columns to export, 1-based and inclusive. Unset axes cover the
/// whole domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub rows: Option<IndexRange>,
    pub cols: Option<IndexRange>,
}

impl WindowConfig {
    /// Resolve to concrete ranges over a `height × width` domain.
    pub fn resolve(&self, height: usize, width: usize) -> (IndexRange, IndexRange) {
        (
            self.rows.unwrap_or_else(|| IndexRange::full(height)),
            self.cols.unwrap_or_else(|| IndexRange::full(width)),
        )
    }
}

/// GeoTIFF export settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Shift the origin half a cell so the tiepoint is the top-left corner
    pub pixel_center_offset: bool,

    /// Flip rows so the northernmost row is written first
    pub flip_rows: bool,

    /// CRS of the domain coordinates
    pub crs: CrsCode,

    /// Write the fill value as the GDAL nodata tag
    pub write_nodata: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pixel_center_offset: true,
            flip_rows: true,
            crs: CrsCode::Epsg4326,
            write_nodata: true,
        }
    }
}

/// Naming used for generated AOI files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AoiConfig {
    /// Parent domain named in gridID file attributes
    pub domain_name: String,

    /// Label between `_surfdata.` and the date stamp
    pub surfdata_label: String,

    /// Cell dimension of surface-data files
    pub cell_dim: String,
}

impl Default for AoiConfig {
    fn default() -> Self {
        Self {
            domain_name: "TESSFA2".to_string(),
            surfdata_label: "TES_SE.4km.1d.NLCD".to_string(),
            cell_dim: "gridcell".to_string(),
        }
    }
}

impl GridtoolConfig {
    /// Load a YAML file, or the defaults when `path` is `None`, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> GridResult<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        Ok(config.apply_env())
    }

    /// Parse a YAML configuration file. Missing sections take their defaults.
    pub fn from_yaml_file(path: &Path) -> GridResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GridError::config(format!("cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
            .map_err(|e| GridError::config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Apply `GRIDTOOL_*` environment variables over `self`.
    pub fn apply_env(mut self) -> Self {
        self.remap = self.remap.with_env_overrides();

        if let Ok(val) = std::env::var("GRIDTOOL_GRID_ID_VAR") {
            self.mask.grid_id = val;
        }

        if let Ok(val) = std::env::var("GRIDTOOL_ROWS") {
            if let Ok(range) = val.parse() {
                self.window.rows = Some(range);
            }
        }

        if let Ok(val) = std::env::var("GRIDTOOL_COLS") {
            if let Ok(range) = val.parse() {
                self.window.cols = Some(range);
            }
        }

        if let Ok(val) = std::env::var("GRIDTOOL_CRS") {
            if let Ok(crs) = val.parse() {
                self.export.crs = crs;
            }
        }

        if let Ok(val) = std::env::var("GRIDTOOL_PIXEL_CENTER_OFFSET") {
            self.export.pixel_center_offset = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("GRIDTOOL_FLIP_ROWS") {
            self.export.flip_rows = parse_flag(&val);
        }

        if let Ok(val) = std::env::var("GRIDTOOL_DOMAIN_NAME") {
            self.aoi.domain_name = val;
        }

        if let Ok(val) = std::env::var("GRIDTOOL_SURFDATA_LABEL") {
            self.aoi.surfdata_label = val;
        }

        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.remap.validate()?;

        for (axis, range) in [("rows", self.window.rows), ("cols", self.window.cols)] {
            if let Some(range) = range {
                if range.is_empty() {
                    return Err(format!("window.{} {} is empty or inverted", axis, range));
                }
            }
        }

        if self.mask.x.is_empty() || self.mask.y.is_empty() || self.mask.grid_id.is_empty() {
            return Err("mask variable names must not be empty".to_string());
        }

        if self.aoi.surfdata_label.is_empty() {
            return Err("aoi.surfdata_label must not be empty".to_string());
        }

        Ok(())
    }
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}
