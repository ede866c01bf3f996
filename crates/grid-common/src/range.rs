//! Inclusive, 1-based index ranges used to select sub-windows.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An inclusive 1-based range `min..=max`, as written in window settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub min: usize,
    pub max: usize,
}

impl IndexRange {
    /// Create a new range. No validation is done here; see `sub_window`.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// The range covering an axis of length `len`.
    pub fn full(len: usize) -> Self {
        Self { min: 1, max: len }
    }

    /// Number of indices covered, 0 for empty or inverted ranges.
    pub fn len(&self) -> usize {
        if self.min == 0 || self.max < self.min {
            0
        } else {
            self.max - self.min + 1
        }
    }

    /// Check if the range covers no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the range fits inside an axis of length `len`.
    pub fn fits(&self, len: usize) -> bool {
        !self.is_empty() && self.max <= len
    }

    /// Clamp the range to an axis of length `len`. Returns `None` when nothing remains.
    pub fn clamp_to(&self, len: usize) -> Option<Self> {
        let min = self.min.max(1);
        let max = self.max.min(len);
        if len == 0 || max < min {
            return None;
        }
        Some(Self { min, max })
    }

    /// Equivalent 0-based half-open range.
    pub fn to_zero_based(&self) -> std::ops::Range<usize> {
        (self.min.saturating_sub(1))..self.max
    }
}

impl fmt::Display for IndexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.min, self.max)
    }
}

impl FromStr for IndexRange {
    type Err = RangeParseError;

    /// Parse "MIN:MAX" (also accepts "MIN-MAX" and "MIN,MAX").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split([':', '-', ',']).map(str::trim).collect();
        if parts.len() != 2 {
            return Err(RangeParseError::InvalidFormat(s.to_string()));
        }

        let min = parts[0]
            .parse()
            .map_err(|_| RangeParseError::InvalidNumber(parts[0].to_string()))?;
        let max = parts[1]
            .parse()
            .map_err(|_| RangeParseError::InvalidNumber(parts[1].to_string()))?;

        Ok(Self { min, max })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RangeParseError {
    #[error("Invalid range format: {0}. Expected 'min:max'")]
    InvalidFormat(String),

    #[error("Invalid number in range: {0}")]
    InvalidNumber(String),
}
