//! Request pipeline: scatter each requested variable, window it, hand it to a sink.
//!
//! Errors are handled per their class. Lookup, dimensionality and range
//! errors are reported and the run moves on to the next request;
//! configuration errors abort the run.

use std::path::PathBuf;

use grid_common::{ErrorClass, GridDomain, GridResult, GridShape};
use grid_remap::{scatter_variable, sub_window, RemapStats, VariableArray, Window};
use netcdf_io::DataSource;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::GridtoolConfig;
use crate::requests::{RequestList, VariableRequest};

/// Something that can supply variables by name.
pub trait VariableSource {
    fn variable(&self, name: &str) -> GridResult<VariableArray>;
}

impl VariableSource for DataSource {
    fn variable(&self, name: &str) -> GridResult<VariableArray> {
        DataSource::variable(self, name)
    }
}

/// Where finished windows go.
pub trait RasterSink {
    /// Store the window for `request`, returning the path written if any.
    fn write(&mut self, request: &VariableRequest, window: &Window<f64>)
        -> GridResult<Option<PathBuf>>;
}

/// A request that produced output.
#[derive(Debug, Clone, Serialize)]
pub struct Exported {
    pub request: String,
    pub path: Option<PathBuf>,
    pub stats: RemapStats,
}

/// A request that was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct Skipped {
    pub request: String,
    pub reason: String,
    #[serde(skip)]
    pub class: ErrorClass,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub exported: Vec<Exported>,
    pub skipped: Vec<Skipped>,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// The per-run state: domain, gridIDs and settings, loaded once.
pub struct Pipeline {
    domain: GridDomain,
    grid_ids: Vec<i64>,
    config: GridtoolConfig,
}

impl Pipeline {
    pub fn new(domain: GridDomain, grid_ids: Vec<i64>, config: GridtoolConfig) -> Self {
        Self {
            domain,
            grid_ids,
            config,
        }
    }

    pub fn shape(&self) -> GridShape {
        self.domain.shape()
    }

    /// Produce the window for one request.
    pub fn window_for(
        &self,
        source: &dyn VariableSource,
        request: &VariableRequest,
    ) -> GridResult<(Window<f64>, RemapStats)> {
        let values = source.variable(&request.name)?.cell_values(request.time_step)?;
        let scattered = scatter_variable(
            &self.grid_ids,
            &values,
            self.shape(),
            self.config.remap.fill_value,
        )?;

        let (rows, cols) = self
            .config
            .window
            .resolve(self.domain.y.len(), self.domain.x.len());
        let window = sub_window(
            &scattered.raster,
            &self.domain.x,
            &self.domain.y,
            rows,
            cols,
            self.config.remap.window_policy,
        )?;

        Ok((window, scattered.stats))
    }

    /// Run every request in order.
    ///
    /// Returns the first configuration-class error; every other failure is
    /// logged, recorded in the summary and skipped.
    pub fn run(
        &self,
        source: &dyn VariableSource,
        sink: &mut dyn RasterSink,
        requests: &RequestList,
    ) -> GridResult<RunSummary> {
        let mut summary = RunSummary::default();

        for request in requests {
            let result = self
                .window_for(source, request)
                .and_then(|(window, stats)| Ok((sink.write(request, &window)?, stats)));

            match result {
                Ok((path, stats)) => {
                    info!(
                        request = %request,
                        placed = stats.placed,
                        skipped_out_of_range = stats.skipped_out_of_range,
                        "Exported variable"
                    );
                    summary.exported.push(Exported {
                        request: request.to_string(),
                        path,
                        stats,
                    });
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(request = %request, class = ?e.class(), error = %e, "Skipping request");
                    summary.skipped.push(Skipped {
                        request: request.to_string(),
                        reason: e.to_string(),
                        class: e.class(),
                    });
                }
            }
        }

        info!(
            exported = summary.exported.len(),
            skipped = summary.skipped.len(),
            "Run complete"
        );
        Ok(summary)
    }
}
