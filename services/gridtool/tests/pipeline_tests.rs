//! Request iteration: which failures skip a request and which abort the run.

use std::collections::HashMap;
use std::path::PathBuf;

use grid_common::{ErrorClass, GridDomain, GridError, GridResult, IndexRange};
use grid_remap::{VariableArray, Window};
use gridtool::{GridtoolConfig, Pipeline, RasterSink, RequestList, VariableRequest, VariableSource};
use test_utils::domains::TINY;

struct MemorySource(HashMap<String, VariableArray>);

impl MemorySource {
    fn new(vars: Vec<VariableArray>) -> Self {
        Self(vars.into_iter().map(|v| (v.name.clone(), v)).collect())
    }
}

impl VariableSource for MemorySource {
    fn variable(&self, name: &str) -> GridResult<VariableArray> {
        self.0
            .get(name)
            .cloned()
            .ok_or_else(|| GridError::VariableNotFound(name.to_string()))
    }
}

#[derive(Default)]
struct CollectSink {
    written: Vec<(String, Window<f64>)>,
}

impl RasterSink for CollectSink {
    fn write(
        &mut self,
        request: &VariableRequest,
        window: &Window<f64>,
    ) -> GridResult<Option<PathBuf>> {
        self.written.push((request.to_string(), window.clone()));
        Ok(None)
    }
}

fn tiny_pipeline(config: GridtoolConfig) -> Pipeline {
    Pipeline::new(GridDomain::new(TINY.x(), TINY.y()), vec![0, 4], config)
}

fn source() -> MemorySource {
    MemorySource::new(vec![
        VariableArray::cells("GPP", vec![10.0, 20.0]),
        VariableArray::new("TLAI", vec![2, 1, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap(),
        VariableArray::new("SOIL", vec![1, 1, 1, 2], vec![1.0, 2.0]).unwrap(),
        VariableArray::cells("SHORT", vec![1.0]),
    ])
}

#[test]
fn test_run_continues_after_recoverable_errors() {
    let requests = RequestList::parse(&["GPP", "NOPE", "SOIL", "TLAI@5", "TLAI@1"]).unwrap();
    let mut sink = CollectSink::default();

    let summary = tiny_pipeline(GridtoolConfig::default())
        .run(&source(), &mut sink, &requests)
        .unwrap();

    let exported: Vec<&str> = summary.exported.iter().map(|e| e.request.as_str()).collect();
    assert_eq!(exported, vec!["GPP", "TLAI@1"]);

    let classes: Vec<ErrorClass> = summary.skipped.iter().map(|s| s.class).collect();
    assert_eq!(
        classes,
        vec![ErrorClass::Lookup, ErrorClass::Dimensionality, ErrorClass::Range]
    );

    let (_, tlai) = &sink.written[1];
    assert_eq!(tlai.raster.get(0, 0), Some(3.0));
    assert_eq!(tlai.raster.get(1, 1), Some(4.0));
}

#[test]
fn test_length_mismatch_aborts_run() {
    let requests = RequestList::parse(&["GPP", "SHORT", "TLAI@0"]).unwrap();
    let mut sink = CollectSink::default();

    let err = tiny_pipeline(GridtoolConfig::default())
        .run(&source(), &mut sink, &requests)
        .unwrap_err();

    assert!(matches!(err, GridError::LengthMismatch { grid_ids: 2, values: 1 }));
    // GPP was written before the abort, TLAI never reached
    assert_eq!(sink.written.len(), 1);
}

#[test]
fn test_window_out_of_bounds_aborts_run() {
    let mut config = GridtoolConfig::default();
    config.window.rows = Some(IndexRange::new(1, 10));
    let requests = RequestList::parse(&["GPP"]).unwrap();
    let mut sink = CollectSink::default();

    let err = tiny_pipeline(config)
        .run(&source(), &mut sink, &requests)
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(sink.written.is_empty());
}

#[test]
fn test_configured_window_and_fill() {
    let mut config = GridtoolConfig::default();
    config.window.cols = Some(IndexRange::new(2, 3));
    config.remap.fill_value = -9999.0;
    let requests = RequestList::parse(&["GPP"]).unwrap();
    let mut sink = CollectSink::default();

    tiny_pipeline(config)
        .run(&source(), &mut sink, &requests)
        .unwrap();

    let (_, window) = &sink.written[0];
    assert_eq!(
        window.raster.to_rows(),
        vec![vec![-9999.0, -9999.0], vec![20.0, -9999.0]]
    );
    assert_eq!(window.x, vec![-89.5, -89.0]);
    assert_eq!(window.cols, IndexRange::new(2, 3));
}
