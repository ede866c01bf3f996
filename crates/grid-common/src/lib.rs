//! Common types shared across the gridID toolkit crates.

pub mod bbox;
pub mod crs;
pub mod domain;
pub mod error;
pub mod range;

pub use bbox::BoundingBox;
pub use crs::CrsCode;
pub use domain::{GridDomain, GridShape};
pub use error::{ErrorClass, GridError, GridResult};
pub use range::IndexRange;
