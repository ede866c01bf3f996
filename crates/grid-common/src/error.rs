//! Error types for gridID remapping and its collaborators.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// How a caller should react to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad arguments, paths or misaligned arrays. The run aborts.
    Configuration,
    /// A requested variable is absent. Reported, the run continues.
    Lookup,
    /// A variable has an unsupported number of axes. Reported, request skipped.
    Dimensionality,
    /// An index outside its valid range. The item is skipped.
    Range,
}

/// Primary error type for gridID operations.
#[derive(Debug, Error)]
pub enum GridError {
    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Length mismatch: {values} values for {grid_ids} gridIDs")]
    LengthMismatch { grid_ids: usize, values: usize },

    #[error("Window {axis} range {min}..={max} outside 1..={len}")]
    WindowOutOfBounds {
        axis: &'static str,
        min: usize,
        max: usize,
        len: usize,
    },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("NetCDF error: {0}")]
    NetCdf(String),

    // === Lookup Errors ===
    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    // === Dimensionality Errors ===
    #[error("Variable '{name}' has unsupported number of dimensions: {ndim}")]
    UnsupportedDimensionality { name: String, ndim: usize },

    // === Range Errors ===
    #[error("Time step {index} out of range 0..{steps}")]
    TimeStepOutOfRange { index: usize, steps: usize },
}

impl GridError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a NetCdf error.
    pub fn netcdf(msg: impl Into<String>) -> Self {
        Self::NetCdf(msg.into())
    }

    /// Classify this error according to the toolkit's error taxonomy.
    pub fn class(&self) -> ErrorClass {
        match self {
            GridError::Config(_)
            | GridError::LengthMismatch { .. }
            | GridError::WindowOutOfBounds { .. }
            | GridError::Io(_)
            | GridError::NetCdf(_) => ErrorClass::Configuration,

            GridError::VariableNotFound(_) => ErrorClass::Lookup,

            GridError::UnsupportedDimensionality { .. } => ErrorClass::Dimensionality,

            GridError::TimeStepOutOfRange { .. } => ErrorClass::Range,
        }
    }

    /// Whether this error must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::Configuration
    }
}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        GridError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert_eq!(
            GridError::LengthMismatch { grid_ids: 2, values: 1 }.class(),
            ErrorClass::Configuration
        );
        assert_eq!(
            GridError::VariableNotFound("GPP".into()).class(),
            ErrorClass::Lookup
        );
        assert_eq!(
            GridError::UnsupportedDimensionality { name: "x".into(), ndim: 4 }.class(),
            ErrorClass::Dimensionality
        );
        assert_eq!(
            GridError::TimeStepOutOfRange { index: 5, steps: 3 }.class(),
            ErrorClass::Range
        );
    }

    #[test]
    fn test_only_configuration_errors_are_fatal() {
        assert!(GridError::config("bad path").is_fatal());
        assert!(!GridError::VariableNotFound("TLAI".into()).is_fatal());
        assert!(!GridError::TimeStepOutOfRange { index: 1, steps: 1 }.is_fatal());
    }

    #[test]
    fn test_length_mismatch_message() {
        let err = GridError::LengthMismatch { grid_ids: 2, values: 1 };
        assert_eq!(err.to_string(), "Length mismatch: 1 values for 2 gridIDs");
    }
}
