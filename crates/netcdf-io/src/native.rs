//! Thin helpers over the native netcdf library.
//!
//! The netcdf crate hands back values in the variable's storage type; these
//! helpers read any numeric variable as `f64` and apply the masking and
//! packing conventions (`_FillValue`, `missing_value`, `scale_factor`,
//! `add_offset`) that land-surface files use.

use std::path::Path;
use std::sync::Once;

use netcdf::types::{FloatType, IntType, NcVariableType};
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// It only needs to be called once per process, but is safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Open a NetCDF file for reading.
pub fn open(path: &Path) -> NetCdfResult<netcdf::File> {
    silence_hdf5_errors();

    if !path.exists() {
        return Err(NetCdfError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }

    debug!(path = %path.display(), "Opening NetCDF file");
    netcdf::open(path)
        .map_err(|e| NetCdfError::invalid(format!("Failed to open {}: {}", path.display(), e)))
}

/// Look up a variable or fail with `MissingData`.
pub fn require_variable<'f>(
    file: &'f netcdf::File,
    name: &str,
) -> NetCdfResult<netcdf::Variable<'f>> {
    file.variable(name)
        .ok_or_else(|| NetCdfError::missing(format!("{} variable", name)))
}

/// Shape of a variable, outermost axis first.
pub fn shape_of(var: &netcdf::Variable) -> Vec<usize> {
    var.dimensions().iter().map(|d| d.len()).collect()
}

/// Dimension names of a variable, outermost axis first.
pub fn dimension_names(var: &netcdf::Variable) -> Vec<String> {
    var.dimensions().iter().map(|d| d.name()).collect()
}

/// Whether the variable holds integers or floats.
pub fn is_numeric(var: &netcdf::Variable) -> bool {
    matches!(var.vartype(), NcVariableType::Int(_) | NcVariableType::Float(_))
}

/// Read every value of a numeric variable, converted to `f64`.
pub fn read_f64(var: &netcdf::Variable) -> NetCdfResult<Vec<f64>> {
    macro_rules! widen {
        ($t:ty) => {
            var.get_values::<$t, _>(..)?
                .into_iter()
                .map(|v| v as f64)
                .collect()
        };
    }

    let values = match var.vartype() {
        NcVariableType::Float(FloatType::F64) => var.get_values::<f64, _>(..)?,
        NcVariableType::Float(FloatType::F32) => widen!(f32),
        NcVariableType::Int(IntType::I8) => widen!(i8),
        NcVariableType::Int(IntType::U8) => widen!(u8),
        NcVariableType::Int(IntType::I16) => widen!(i16),
        NcVariableType::Int(IntType::U16) => widen!(u16),
        NcVariableType::Int(IntType::I32) => widen!(i32),
        NcVariableType::Int(IntType::U32) => widen!(u32),
        NcVariableType::Int(IntType::I64) => widen!(i64),
        NcVariableType::Int(IntType::U64) => widen!(u64),
        _ => {
            return Err(NetCdfError::invalid(format!(
                "variable '{}' has a non-numeric type",
                var.name()
            )))
        }
    };

    Ok(values)
}

/// Read a numeric variable as `f64`, turning masked entries into NaN and
/// applying `scale_factor`/`add_offset`.
///
/// Returns the values and whether any mask attribute was present.
pub fn read_unpacked(var: &netcdf::Variable) -> NetCdfResult<(Vec<f64>, bool)> {
    let raw = read_f64(var)?;
    let masks = mask_values(var);
    let scale = get_f64_attr(var, "scale_factor").unwrap_or(1.0);
    let offset = get_f64_attr(var, "add_offset").unwrap_or(0.0);

    let values = raw
        .into_iter()
        .map(|v| {
            if masks.iter().any(|&m| v == m || (m.is_nan() && v.is_nan())) {
                f64::NAN
            } else {
                v * scale + offset
            }
        })
        .collect();

    Ok((values, !masks.is_empty()))
}

/// Read an integer ID variable as stored, one entry per position.
pub fn read_ids(var: &netcdf::Variable) -> NetCdfResult<Vec<i64>> {
    let ids = match var.vartype() {
        NcVariableType::Int(IntType::I64) => var.get_values::<i64, _>(..)?,
        NcVariableType::Int(IntType::I32) => var
            .get_values::<i32, _>(..)?
            .into_iter()
            .map(i64::from)
            .collect(),
        _ => read_f64(var)?.into_iter().map(|v| v as i64).collect(),
    };
    Ok(ids)
}

/// Read an integer ID variable (such as `gridID`), dropping masked entries.
pub fn read_ids_compressed(var: &netcdf::Variable) -> NetCdfResult<Vec<i64>> {
    let raw = read_ids(var)?;

    let masks: Vec<i64> = mask_values(var)
        .into_iter()
        .filter(|m| m.is_finite())
        .map(|m| m as i64)
        .collect();
    if masks.is_empty() {
        return Ok(raw);
    }

    let total = raw.len();
    let kept: Vec<i64> = raw.into_iter().filter(|id| !masks.contains(id)).collect();
    if kept.len() != total {
        debug!(
            variable = %var.name(),
            masked = total - kept.len(),
            "Dropped masked IDs"
        );
    }
    Ok(kept)
}

/// Values that mark an entry as masked.
fn mask_values(var: &netcdf::Variable) -> Vec<f64> {
    ["_FillValue", "missing_value"]
        .iter()
        .filter_map(|name| get_f64_attr(var, name))
        .collect()
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
pub fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get an attribute as f64.
pub fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}
