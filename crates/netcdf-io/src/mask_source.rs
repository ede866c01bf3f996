//! Mask source: domain coordinates plus the active gridID list.

use std::path::{Path, PathBuf};

use grid_common::{GridDomain, GridShape};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native;

/// Names of the variables a mask file provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskVariables {
    /// 1D x coordinate, one entry per column
    pub x: String,
    /// 1D y coordinate, one entry per row
    pub y: String,
    /// Active-cell gridIDs
    pub grid_id: String,
}

impl Default for MaskVariables {
    fn default() -> Self {
        Self {
            x: "x".to_string(),
            y: "y".to_string(),
            grid_id: "gridID".to_string(),
        }
    }
}

/// Domain and gridIDs loaded from a mask file.
///
/// Masked gridID entries (equal to `_FillValue` or `missing_value`) are
/// dropped at load time, so `grid_ids()[i]` lines up with entry `i` of a
/// compressed variable.
#[derive(Debug, Clone)]
pub struct MaskSource {
    path: PathBuf,
    domain: GridDomain,
    grid_ids: Vec<i64>,
}

impl MaskSource {
    /// Read `x`, `y` and `gridID` from a NetCDF mask file.
    pub fn open(path: impl AsRef<Path>, vars: &MaskVariables) -> NetCdfResult<Self> {
        let path = path.as_ref();
        let file = native::open(path)?;

        let x_var = native::require_variable(&file, &vars.x)?;
        let y_var = native::require_variable(&file, &vars.y)?;
        for var in [&x_var, &y_var] {
            if var.dimensions().len() != 1 {
                return Err(NetCdfError::invalid(format!(
                    "coordinate '{}' must be 1D, found {} dimensions",
                    var.name(),
                    var.dimensions().len()
                )));
            }
        }
        let x = native::read_f64(&x_var)?;
        let y = native::read_f64(&y_var)?;

        let id_var = native::require_variable(&file, &vars.grid_id)?;
        let grid_ids = native::read_ids_compressed(&id_var)?;

        let domain = GridDomain::new(x, y);
        let shape = domain.shape();
        info!(
            path = %path.display(),
            height = shape.height,
            width = shape.width,
            active = grid_ids.len(),
            "Loaded mask source"
        );

        Ok(Self {
            path: path.to_path_buf(),
            domain,
            grid_ids,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn domain(&self) -> &GridDomain {
        &self.domain
    }

    pub fn shape(&self) -> GridShape {
        self.domain.shape()
    }

    /// Active gridIDs in file order.
    pub fn grid_ids(&self) -> &[i64] {
        &self.grid_ids
    }
}
