//! Subset a 1D surface-data file to the cells of an AOI.
//!
//! Global attributes and dimensions are copied, with the cell dimension
//! resized to the AOI. Variables whose last dimension is the cell dimension
//! are gathered along it; every other variable is copied unchanged.

use std::path::{Path, PathBuf};

use grid_remap::{select_cell_indices, CellSelection};
use netcdf::types::{FloatType, IntType, NcTypeDescriptor, NcVariableType};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{NetCdfError, NetCdfResult};
use crate::naming;
use crate::native;

/// Options for [`subset_surfdata`].
#[derive(Debug, Clone)]
pub struct SubsetOptions {
    /// AOI name, used in the output file name and title
    pub aoi: String,
    /// Label between `_surfdata.` and the date stamp, such as `TES_SE.4km.1d.NLCD`
    pub label: String,
    /// `yymmdd` creation stamp
    pub stamp: String,
    /// Name of the cell dimension
    pub cell_dim: String,
    /// Name of the source's gridID variable
    pub id_variable: String,
}

impl SubsetOptions {
    pub fn new(aoi: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            aoi: aoi.into(),
            label: label.into(),
            stamp: naming::date_stamp(),
            cell_dim: "gridcell".to_string(),
            id_variable: "gridID".to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        naming::surfdata_file_name(&self.aoi, &self.label, &self.stamp)
    }
}

/// What a subset run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubsetReport {
    pub path: PathBuf,
    /// Cells in the output
    pub cells: usize,
    /// AOI gridIDs absent from the source
    pub missing: Vec<i64>,
    /// Variables gathered along the cell dimension
    pub gathered: Vec<String>,
    /// Variables copied unchanged
    pub copied: Vec<String>,
    /// Non-numeric variables left out
    pub skipped: Vec<String>,
}

/// Write `<out_dir>/<AOI>_surfdata.<label>.c<yymmdd>.nc` holding the cells of
/// `source` whose gridID is in `aoi_ids`, in source order.
///
/// An existing output file is replaced. It is an error for none of the AOI
/// gridIDs to occur in the source.
pub fn subset_surfdata(
    source: &Path,
    out_dir: &Path,
    aoi_ids: &[i64],
    options: &SubsetOptions,
) -> NetCdfResult<SubsetReport> {
    let src = native::open(source)?;

    let cell_len = src
        .dimension(&options.cell_dim)
        .map(|d| d.len())
        .ok_or_else(|| NetCdfError::missing(format!("{} dimension", options.cell_dim)))?;
    let source_ids = native::read_ids(&native::require_variable(&src, &options.id_variable)?)?;
    if source_ids.len() != cell_len {
        return Err(NetCdfError::invalid(format!(
            "{} has {} entries but {} has length {}",
            options.id_variable,
            source_ids.len(),
            options.cell_dim,
            cell_len
        )));
    }

    let selection = select_cell_indices(&source_ids, aoi_ids);
    if selection.is_empty() {
        return Err(NetCdfError::invalid(format!(
            "none of the {} AOI gridIDs occur in {}",
            aoi_ids.len(),
            source.display()
        )));
    }
    debug!(first = ?&selection.indices[..selection.len().min(10)], "Selected cell indices");

    let path = out_dir.join(options.file_name());
    if path.exists() {
        std::fs::remove_file(&path)?;
    }
    info!(output = %path.display(), cells = selection.len(), "Writing AOI surface data");

    let mut dst = netcdf::create(&path)?;

    for attr in src.attributes() {
        dst.add_attribute(attr.name(), attr.value()?)?;
    }

    for dim in src.dimensions() {
        let name = dim.name();
        if name == options.cell_dim {
            dst.add_dimension(&name, selection.len())?;
        } else if dim.is_unlimited() && dim.len() == 0 {
            dst.add_unlimited_dimension(&name)?;
        } else {
            dst.add_dimension(&name, dim.len())?;
        }
    }

    let mut report = SubsetReport {
        cells: selection.len(),
        missing: selection.missing.clone(),
        ..Default::default()
    };

    for var in src.variables() {
        let name = var.name();
        let dims = native::dimension_names(&var);
        let dim_refs: Vec<&str> = dims.iter().map(String::as_str).collect();
        let gather = dims.last().map(|d| d == &options.cell_dim).unwrap_or(false);

        if !native::is_numeric(&var) {
            warn!(variable = %name, "Skipping non-numeric variable");
            report.skipped.push(name);
            continue;
        }

        let cells = gather.then_some((&selection, cell_len));
        copy_numeric(&var, &mut dst, &dim_refs, cells)?;
        debug!(variable = %name, dims = ?dims, gathered = gather, "Copied variable");

        if gather {
            report.gathered.push(name);
        } else {
            report.copied.push(name);
        }
    }

    let title = format!(
        "1D surfdata for {}, generated on {} with {}",
        options.aoi,
        options.stamp,
        source.display()
    );
    dst.add_attribute("title", title.as_str())?;

    info!(
        gathered = report.gathered.len(),
        copied = report.copied.len(),
        missing = report.missing.len(),
        "AOI surface data written"
    );
    report.path = path;
    Ok(report)
}

fn copy_numeric(
    var: &netcdf::Variable,
    dst: &mut netcdf::FileMut,
    dims: &[&str],
    cells: Option<(&CellSelection, usize)>,
) -> NetCdfResult<()> {
    match var.vartype() {
        NcVariableType::Float(FloatType::F64) => copy_typed::<f64>(var, dst, dims, cells),
        NcVariableType::Float(FloatType::F32) => copy_typed::<f32>(var, dst, dims, cells),
        NcVariableType::Int(IntType::I8) => copy_typed::<i8>(var, dst, dims, cells),
        NcVariableType::Int(IntType::U8) => copy_typed::<u8>(var, dst, dims, cells),
        NcVariableType::Int(IntType::I16) => copy_typed::<i16>(var, dst, dims, cells),
        NcVariableType::Int(IntType::U16) => copy_typed::<u16>(var, dst, dims, cells),
        NcVariableType::Int(IntType::I32) => copy_typed::<i32>(var, dst, dims, cells),
        NcVariableType::Int(IntType::U32) => copy_typed::<u32>(var, dst, dims, cells),
        NcVariableType::Int(IntType::I64) => copy_typed::<i64>(var, dst, dims, cells),
        NcVariableType::Int(IntType::U64) => copy_typed::<u64>(var, dst, dims, cells),
        _ => Err(NetCdfError::invalid(format!(
            "variable '{}' has a non-numeric type",
            var.name()
        ))),
    }
}

/// Copy one variable in its storage type, gathering along the last axis when
/// `cells` is given. Gathered variables lose their `_FillValue`.
fn copy_typed<T: NcTypeDescriptor + Copy>(
    var: &netcdf::Variable,
    dst: &mut netcdf::FileMut,
    dims: &[&str],
    cells: Option<(&CellSelection, usize)>,
) -> NetCdfResult<()> {
    let values: Vec<T> = var.get_values::<T, _>(..)?;
    let values = match cells {
        Some((selection, axis_len)) => selection.gather_last_axis(&values, axis_len)?,
        None => values,
    };

    let mut out = dst.add_variable::<T>(&var.name(), dims)?;
    for attr in var.attributes() {
        if cells.is_some() && attr.name() == "_FillValue" {
            continue;
        }
        out.put_attribute(attr.name(), attr.value()?)?;
    }
    if !values.is_empty() {
        out.put_values(&values, ..)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_file_name() {
        let mut options = SubsetOptions::new("AKSP", "Daymet_NA.1km.1d");
        options.stamp = "240403".to_string();
        assert_eq!(options.file_name(), "AKSP_surfdata.Daymet_NA.1km.1d.c240403.nc");
        assert_eq!(options.cell_dim, "gridcell");
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = SubsetOptions::new("X", "test");
        let err = subset_surfdata(&dir.path().join("nope.nc"), dir.path(), &[1], &options)
            .unwrap_err();
        assert!(matches!(err, NetCdfError::IoError(_)));
    }
}
