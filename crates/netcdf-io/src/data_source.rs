//! Data source: named per-cell variables.

use std::path::{Path, PathBuf};

use grid_common::{GridError, GridResult};
use grid_remap::VariableArray;
use tracing::debug;

use crate::error::NetCdfResult;
use crate::native;

/// A NetCDF file of compressed land-surface variables.
pub struct DataSource {
    path: PathBuf,
    file: netcdf::File,
}

impl DataSource {
    pub fn open(path: impl AsRef<Path>) -> NetCdfResult<Self> {
        let path = path.as_ref();
        let file = native::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every variable in the file.
    pub fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|v| v.name()).collect()
    }

    /// Read a variable as a [`VariableArray`].
    ///
    /// Masked entries become NaN and the array's fill value is set to NaN so
    /// that `cell_values` compresses them away. Packed values are unpacked.
    /// An absent variable is a lookup error, not a fatal one.
    pub fn variable(&self, name: &str) -> GridResult<VariableArray> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| GridError::VariableNotFound(name.to_string()))?;

        let shape = native::shape_of(&var);
        let (values, masked) = native::read_unpacked(&var).map_err(GridError::from)?;
        debug!(
            variable = name,
            shape = ?shape,
            masked,
            "Read variable"
        );

        let array = VariableArray::new(name, shape, values)?;
        Ok(array.with_fill_value(masked.then_some(f64::NAN)))
    }
}
