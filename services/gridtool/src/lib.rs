//! gridtool: extract, subset and export gridID land-surface data.
//!
//! The library holds everything the binary does so it can be driven from
//! tests: configuration, request parsing, the export pipeline and the
//! subcommands.

pub mod commands;
pub mod config;
pub mod pipeline;
pub mod requests;
pub mod sink;

pub use config::GridtoolConfig;
pub use pipeline::{Pipeline, RasterSink, RunSummary, VariableSource};
pub use requests::{RequestList, VariableRequest};
pub use sink::GeoTiffSink;
