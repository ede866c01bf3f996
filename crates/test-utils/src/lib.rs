//! Test support shared by the gridid-tools crates.
//!
//! - [`domains`]: small regular domains (`TINY`, `SMALL`) with gridID helpers
//! - gridID and value generators
//! - `netcdf_files` (behind the `netcdf` feature): writers for mask, data,
//!   domain and surfdata fixtures
//! - [`temp_test_dir`] and [`assert_approx_eq!`]
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils", features = ["netcdf"] }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Assert that two numbers differ by at most `epsilon`.
///
/// Both sides are widened to `f64`, so `f32` rasters compare against `f64`
/// literals without casts.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left = $left as f64;
        let right = $right as f64;
        let epsilon = $epsilon as f64;
        if (left - right).abs() > epsilon {
            panic!(
                "assertion failed: `{} ≈ {}` (|diff| = {} > {})",
                left,
                right,
                (left - right).abs(),
                epsilon
            );
        }
    }};
}
