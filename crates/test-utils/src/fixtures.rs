//! Common test fixtures for gridID tests.
//!
//! Small domains with known layouts, plus (behind the `netcdf` feature)
//! writers that produce the NetCDF files the tools read: mask, data,
//! domain and 1D surface-data files.

/// Small domains used across the test suite.
pub mod domains {
    /// The 2 x 3 domain used in the remap examples.
    pub const TINY: DomainSpec = DomainSpec {
        height: 2,
        width: 3,
        x0: -90.0,
        y0: 35.0,
        step: 0.5,
    };

    /// A 4 x 5 domain, big enough for windows and AOI polygons.
    pub const SMALL: DomainSpec = DomainSpec {
        height: 4,
        width: 5,
        x0: -84.0,
        y0: 35.0,
        step: 0.25,
    };

    /// Domain specification for testing.
    #[derive(Debug, Clone, Copy)]
    pub struct DomainSpec {
        pub height: usize,
        pub width: usize,
        /// First x cell centre
        pub x0: f64,
        /// First y cell centre
        pub y0: f64,
        /// Cell size in both directions
        pub step: f64,
    }

    impl DomainSpec {
        /// Returns the total number of cells.
        pub fn size(&self) -> usize {
            self.width * self.height
        }

        pub fn x(&self) -> Vec<f64> {
            crate::coordinate_axis(self.x0, self.step, self.width)
        }

        pub fn y(&self) -> Vec<f64> {
            crate::coordinate_axis(self.y0, self.step, self.height)
        }

        /// Cell centres of `grid_ids`, as `(xc, yc)`.
        pub fn centres(&self, grid_ids: &[i64]) -> (Vec<f64>, Vec<f64>) {
            grid_ids
                .iter()
                .map(|&id| {
                    let id = id as usize;
                    let row = id / self.width;
                    let col = id % self.width;
                    (
                        self.x0 + self.step * col as f64,
                        self.y0 + self.step * row as f64,
                    )
                })
                .unzip()
        }
    }
}

/// Writers for NetCDF fixture files.
#[cfg(feature = "netcdf")]
pub mod netcdf_files {
    use std::path::Path;

    /// A variable to write into a data file.
    #[derive(Debug, Clone)]
    pub struct FixtureVar<'a> {
        pub name: &'a str,
        /// Dimension names and lengths, outermost first
        pub dims: &'a [(&'a str, usize)],
        pub values: Vec<f32>,
        pub fill_value: Option<f32>,
    }

    impl<'a> FixtureVar<'a> {
        pub fn new(name: &'a str, dims: &'a [(&'a str, usize)], values: Vec<f32>) -> Self {
            Self {
                name,
                dims,
                values,
                fill_value: None,
            }
        }

        pub fn with_fill(mut self, fill: f32) -> Self {
            self.fill_value = Some(fill);
            self
        }
    }

    /// Write a mask file: 1D `x`, `y` and a `gridID` list over `gridcell`.
    ///
    /// With `fill_value` set, the gridID variable carries `_FillValue` and any
    /// entries equal to it are masked.
    pub fn write_mask_file(
        path: &Path,
        x: &[f64],
        y: &[f64],
        grid_ids: &[i32],
        fill_value: Option<i32>,
    ) -> Result<(), netcdf::Error> {
        let mut file = netcdf::create(path)?;
        file.add_dimension("x", x.len())?;
        file.add_dimension("y", y.len())?;
        file.add_dimension("gridcell", grid_ids.len())?;

        {
            let mut var = file.add_variable::<f64>("x", &["x"])?;
            var.put_attribute("long_name", "x coordinate")?;
            var.put_values(x, ..)?;
        }
        {
            let mut var = file.add_variable::<f64>("y", &["y"])?;
            var.put_attribute("long_name", "y coordinate")?;
            var.put_values(y, ..)?;
        }
        {
            let mut var = file.add_variable::<i32>("gridID", &["gridcell"])?;
            if let Some(fill) = fill_value {
                var.put_attribute("_FillValue", fill)?;
            }
            var.put_values(grid_ids, ..)?;
        }

        Ok(())
    }

    /// Write a data file with the given float variables.
    pub fn write_data_file(path: &Path, vars: &[FixtureVar<'_>]) -> Result<(), netcdf::Error> {
        let mut file = netcdf::create(path)?;

        for var in vars {
            for &(dim, len) in var.dims {
                if file.dimension(dim).is_none() {
                    file.add_dimension(dim, len)?;
                }
            }
        }

        for var in vars {
            let dim_names: Vec<&str> = var.dims.iter().map(|(name, _)| *name).collect();
            let mut nc_var = file.add_variable::<f32>(var.name, &dim_names)?;
            if let Some(fill) = var.fill_value {
                nc_var.put_attribute("_FillValue", fill)?;
            }
            nc_var.put_values(&var.values, ..)?;
        }

        file.add_attribute("title", "gridID test data")?;
        Ok(())
    }

    /// Write a 1D domain file: `xc`, `yc` and `gridID` over `nj = 1`, `ni = N`.
    pub fn write_domain_file(
        path: &Path,
        xc: &[f64],
        yc: &[f64],
        grid_ids: &[i32],
    ) -> Result<(), netcdf::Error> {
        let mut file = netcdf::create(path)?;
        file.add_dimension("nj", 1)?;
        file.add_dimension("ni", grid_ids.len())?;

        {
            let mut var = file.add_variable::<f64>("xc", &["nj", "ni"])?;
            var.put_attribute("long_name", "longitude of grid cell center")?;
            var.put_attribute("units", "degrees_east")?;
            var.put_values(xc, ..)?;
        }
        {
            let mut var = file.add_variable::<f64>("yc", &["nj", "ni"])?;
            var.put_attribute("long_name", "latitude of grid cell center")?;
            var.put_attribute("units", "degrees_north")?;
            var.put_values(yc, ..)?;
        }
        {
            let mut var = file.add_variable::<i32>("gridID", &["nj", "ni"])?;
            var.put_values(grid_ids, ..)?;
        }

        file.add_attribute("title", "1D domain for testing")?;
        Ok(())
    }

    /// Write a 1D surface-data file over `gridcell`.
    ///
    /// Contents, with `G = grid_ids.len()`:
    /// - `gridID(gridcell)` i32
    /// - `AREA(gridcell)` f64, `gridID * 1.5`, with `_FillValue`
    /// - `PCT_NAT_PFT(natpft = 2, gridcell)` f64, layer `k` holds `gridID + 100 * k`
    /// - `MONTHLY_LAI(time = 2, lsmpft = 2, gridcell)` f32, `gridID + 10 * (t * 2 + l)`
    /// - `natpft(natpft)` i32, not on gridcell
    /// - global `source` attribute
    pub fn write_surfdata_file(path: &Path, grid_ids: &[i32]) -> Result<(), netcdf::Error> {
        let g = grid_ids.len();
        let mut file = netcdf::create(path)?;
        file.add_dimension("gridcell", g)?;
        file.add_dimension("natpft", 2)?;
        file.add_dimension("lsmpft", 2)?;
        file.add_dimension("time", 2)?;

        {
            let mut var = file.add_variable::<i32>("gridID", &["gridcell"])?;
            var.put_attribute("long_name", "gridId in the domain")?;
            var.put_values(grid_ids, ..)?;
        }
        {
            let area: Vec<f64> = grid_ids.iter().map(|&id| id as f64 * 1.5).collect();
            let mut var = file.add_variable::<f64>("AREA", &["gridcell"])?;
            var.put_attribute("_FillValue", -9999.0f64)?;
            var.put_attribute("units", "km^2")?;
            var.put_values(&area, ..)?;
        }
        {
            let pct: Vec<f64> = (0..2)
                .flat_map(|k| grid_ids.iter().map(move |&id| (id + 100 * k) as f64))
                .collect();
            let mut var = file.add_variable::<f64>("PCT_NAT_PFT", &["natpft", "gridcell"])?;
            var.put_attribute("units", "%")?;
            var.put_values(&pct, ..)?;
        }
        {
            let lai: Vec<f32> = (0..4)
                .flat_map(|layer| grid_ids.iter().map(move |&id| (id + 10 * layer) as f32))
                .collect();
            let mut var =
                file.add_variable::<f32>("MONTHLY_LAI", &["time", "lsmpft", "gridcell"])?;
            var.put_values(&lai, ..)?;
        }
        {
            let mut var = file.add_variable::<i32>("natpft", &["natpft"])?;
            var.put_values(&[0i32, 1], ..)?;
        }

        file.add_attribute("source", "surfdata fixture")?;
        Ok(())
    }
}
