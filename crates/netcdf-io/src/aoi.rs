//! AOI gridID files: domain cell centres in, gridID lists in and out.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{NetCdfError, NetCdfResult};
use crate::naming;
use crate::native;

/// Cell centres and gridIDs of a 1D domain file (`xc`, `yc`, `gridID`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainCells {
    pub grid_ids: Vec<i64>,
    pub xc: Vec<f64>,
    pub yc: Vec<f64>,
}

impl DomainCells {
    pub fn len(&self) -> usize {
        self.grid_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid_ids.is_empty()
    }
}

/// Read `xc`, `yc` and `gridID` from a domain file, flattening any
/// singleton axes (`nj = 1 × ni = N` reads as `N`).
pub fn read_domain_cells(path: &Path) -> NetCdfResult<DomainCells> {
    let file = native::open(path)?;

    let xc = native::read_f64(&native::require_variable(&file, "xc")?)?;
    let yc = native::read_f64(&native::require_variable(&file, "yc")?)?;
    let id_var = native::require_variable(&file, "gridID")?;
    let grid_ids = native::read_ids_compressed(&id_var)?;

    if xc.len() != grid_ids.len() || yc.len() != grid_ids.len() {
        return Err(NetCdfError::invalid(format!(
            "domain file has {} xc, {} yc and {} gridID entries",
            xc.len(),
            yc.len(),
            grid_ids.len()
        )));
    }

    info!(path = %path.display(), cells = grid_ids.len(), "Loaded domain cells");
    Ok(DomainCells { grid_ids, xc, yc })
}

/// Kinds of file that can supply an AOI's gridIDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AoiPointsFormat {
    /// `<AOI>_gridID.csv`: a header line then one gridID per row
    Csv,
    /// A `*domain*.nc` or `<AOI>_gridID.c<yymmdd>.nc` file with a `gridID` variable
    NetCdf,
}

impl AoiPointsFormat {
    /// Detect the format from the file name.
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with("gridID.csv") {
            Some(Self::Csv)
        } else if (name.contains("domain") || name.contains("_gridID.")) && name.ends_with(".nc") {
            Some(Self::NetCdf)
        } else {
            None
        }
    }
}

/// Read an AOI's gridIDs from a `_gridID.csv`, `*domain*.nc` or AOI gridID file.
pub fn read_aoi_grid_ids(path: &Path) -> NetCdfResult<Vec<i64>> {
    let format = AoiPointsFormat::detect(path).ok_or_else(|| {
        NetCdfError::invalid(format!(
            "{}: expected <AOI>_gridID.csv, <AOI>_domain*.nc or <AOI>_gridID.c*.nc",
            path.display()
        ))
    })?;

    let ids = match format {
        AoiPointsFormat::Csv => read_csv_ids(path)?,
        AoiPointsFormat::NetCdf => {
            let file = native::open(path)?;
            let var = native::require_variable(&file, "gridID")?;
            native::read_ids_compressed(&var)?
        }
    };

    info!(path = %path.display(), count = ids.len(), ?format, "Read AOI gridIDs");
    Ok(ids)
}

fn read_csv_ids(path: &Path) -> NetCdfResult<Vec<i64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut ids = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let Some(field) = record.get(0).map(str::trim) else {
            continue;
        };
        if field.is_empty() {
            continue;
        }
        let id = parse_id(field).ok_or_else(|| {
            // +2: header line and 1-based numbering
            NetCdfError::invalid(format!("line {}: invalid gridID '{}'", line + 2, field))
        })?;
        ids.push(id);
    }
    Ok(ids)
}

/// Accept integer text, plus integral floats such as `1234.0` from spreadsheets.
fn parse_id(field: &str) -> Option<i64> {
    field.parse::<i64>().ok().or_else(|| {
        let v = field.parse::<f64>().ok()?;
        (v.fract() == 0.0 && v.is_finite()).then_some(v as i64)
    })
}

/// Metadata for a written AOI gridID file.
#[derive(Debug, Clone)]
pub struct AoiGridIdFile {
    /// AOI name, used in the file name and title
    pub aoi: String,
    /// Name of the parent domain, used in attribute text
    pub domain_name: String,
    /// `yymmdd` creation stamp
    pub stamp: String,
}

impl AoiGridIdFile {
    pub fn new(aoi: impl Into<String>, domain_name: impl Into<String>) -> Self {
        Self {
            aoi: aoi.into(),
            domain_name: domain_name.into(),
            stamp: naming::date_stamp(),
        }
    }

    pub fn file_name(&self) -> String {
        naming::aoi_grid_id_file_name(&self.aoi, &self.stamp)
    }

    /// Write `grid_ids` as `gridID(nj = 1, ni = N)` into `out_dir`.
    ///
    /// Returns the path written. An existing file of the same name is replaced.
    pub fn write(&self, out_dir: &Path, grid_ids: &[i64]) -> NetCdfResult<PathBuf> {
        native::silence_hdf5_errors();
        let path = out_dir.join(self.file_name());
        if path.exists() {
            std::fs::remove_file(&path)?;
        }

        let ids: Vec<i32> = grid_ids
            .iter()
            .map(|&id| {
                i32::try_from(id).map_err(|_| {
                    NetCdfError::invalid(format!("gridID {} does not fit in a 32-bit integer", id))
                })
            })
            .collect::<NetCdfResult<_>>()?;

        if ids.is_empty() {
            warn!(aoi = %self.aoi, "No gridIDs selected; writing an empty AOI file");
        }

        let mut file = netcdf::create(&path)?;
        file.add_dimension("nj", 1)?;
        file.add_dimension("ni", ids.len())?;

        {
            let mut var = file.add_variable::<i32>("gridID", &["nj", "ni"])?;
            var.set_compression(5, false)?;
            let long_name = format!("gridId in the {} domain", self.domain_name);
            var.put_attribute("long_name", long_name.as_str())?;
            var.put_attribute(
                "description",
                "start from #0 at the upper left corner of the domain, covering all land and ocean gridcells",
            )?;
            if !ids.is_empty() {
                var.put_values(&ids, ..)?;
            }
        }

        let title = format!("{} land gridcells in the {} domain", self.aoi, self.domain_name);
        file.add_attribute("title", title.as_str())?;

        info!(path = %path.display(), count = ids.len(), "Wrote AOI gridID file");
        Ok(path)
    }
}
