//! File naming conventions for generated AOI products.

use std::path::Path;

use chrono::Local;

/// Today's date as `yymmdd`, the creation stamp used in file names and titles.
pub fn date_stamp() -> String {
    Local::now().format("%y%m%d").to_string()
}

/// `<AOI>_gridID.c<yymmdd>.nc`
pub fn aoi_grid_id_file_name(aoi: &str, stamp: &str) -> String {
    format!("{}_gridID.c{}.nc", aoi, stamp)
}

/// `<AOI>_surfdata.<label>.c<yymmdd>.nc`
pub fn surfdata_file_name(aoi: &str, label: &str, stamp: &str) -> String {
    format!("{}_surfdata.{}.c{}.nc", aoi, label, stamp)
}

/// The AOI name encoded in an AOI points file: everything before the first `_`.
///
/// `AKSP_gridID.csv` and `AKSP_domain.lnd.1km.nc` both give `AKSP`.
pub fn aoi_name_from_file(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let aoi = name.split('_').next()?;
    if aoi.is_empty() {
        None
    } else {
        Some(aoi.to_string())
    }
}
