//! Per-cell variable arrays as read from a data source.

use grid_common::{GridError, GridResult};
use tracing::info;

/// How a variable's axes map onto cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    /// One axis: one value per active cell.
    Cells,
    /// Two spatial axes (for example `nj × ni`), used as-is after flattening.
    Spatial,
    /// A leading time axis over one of the layouts above.
    TimeSeries { time_steps: usize },
}

/// A variable's values in row-major order, with its shape.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableArray {
    pub name: String,
    pub shape: Vec<usize>,
    pub values: Vec<f64>,
    /// Entries equal to this value are masked and removed by `cell_values`.
    pub fill_value: Option<f64>,
}

impl VariableArray {
    /// Create a new variable array, checking that `values` matches `shape`.
    pub fn new(name: impl Into<String>, shape: Vec<usize>, values: Vec<f64>) -> GridResult<Self> {
        let name = name.into();
        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(GridError::config(format!(
                "variable '{}' has shape {:?} ({} values) but {} values were supplied",
                name,
                shape,
                expected,
                values.len()
            )));
        }
        Ok(Self {
            name,
            shape,
            values,
            fill_value: None,
        })
    }

    /// Set the fill value used to mask entries.
    pub fn with_fill_value(mut self, fill_value: Option<f64>) -> Self {
        self.fill_value = fill_value;
        self
    }

    /// A one-axis variable, the common "one value per gridID" layout.
    pub fn cells(name: impl Into<String>, values: Vec<f64>) -> Self {
        let len = values.len();
        Self {
            name: name.into(),
            shape: vec![len],
            values,
            fill_value: None,
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Classify the variable's axes.
    pub fn dimensionality(&self) -> GridResult<Dimensionality> {
        match self.shape.len() {
            1 => Ok(Dimensionality::Cells),
            2 => Ok(Dimensionality::Spatial),
            3 => Ok(Dimensionality::TimeSeries {
                time_steps: self.shape[0],
            }),
            ndim => Err(GridError::UnsupportedDimensionality {
                name: self.name.clone(),
                ndim,
            }),
        }
    }

    /// Number of time steps, if the variable has a leading time axis.
    pub fn time_steps(&self) -> Option<usize> {
        match self.dimensionality() {
            Ok(Dimensionality::TimeSeries { time_steps }) => Some(time_steps),
            _ => None,
        }
    }

    /// Borrow one time step of a time-series variable.
    ///
    /// The index must satisfy `0 <= index < time_steps`.
    pub fn time_slice(&self, index: usize) -> GridResult<&[f64]> {
        let steps = match self.dimensionality()? {
            Dimensionality::TimeSeries { time_steps } => time_steps,
            _ => {
                return Err(GridError::config(format!(
                    "variable '{}' has no time axis",
                    self.name
                )))
            }
        };
        if index >= steps {
            return Err(GridError::TimeStepOutOfRange { index, steps });
        }

        let step_len: usize = self.shape[1..].iter().product();
        let start = index * step_len;
        Ok(&self.values[start..start + step_len])
    }

    /// Per-cell values ready to scatter.
    ///
    /// Time-series variables are reduced to the requested step (step 0 when
    /// none is given); other layouts ignore `time_step`. Masked entries (equal
    /// to the fill value) are then removed.
    pub fn cell_values(&self, time_step: Option<usize>) -> GridResult<Vec<f64>> {
        let slice = match self.dimensionality()? {
            Dimensionality::Cells | Dimensionality::Spatial => &self.values[..],
            Dimensionality::TimeSeries { time_steps } => {
                let index = match time_step {
                    Some(index) => index,
                    None => {
                        info!(
                            variable = %self.name,
                            time_steps,
                            "No time step requested, using step 0"
                        );
                        0
                    }
                };
                self.time_slice(index)?
            }
        };

        Ok(compress(slice, self.fill_value))
    }
}

/// Drop masked entries, keeping order.
pub fn compress(values: &[f64], fill_value: Option<f64>) -> Vec<f64> {
    match fill_value {
        None => values.to_vec(),
        Some(fill) if fill.is_nan() => values.iter().copied().filter(|v| !v.is_nan()).collect(),
        Some(fill) => values.iter().copied().filter(|&v| v != fill).collect(),
    }
}
