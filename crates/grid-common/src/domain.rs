//! Grid domain definitions for gridID-keyed data.

use crate::BoundingBox;
use serde::{Deserialize, Serialize};

/// Dimensions of a 2D domain in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of rows (length of the y coordinate vector)
    pub height: usize,
    /// Number of columns (length of the x coordinate vector)
    pub width: usize,
}

impl GridShape {
    /// Create a new grid shape.
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.height * self.width
    }

    /// Check if the shape has no cells.
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Convert a gridID to a flat index, or `None` if it lies outside the domain.
    pub fn flat_index(&self, grid_id: i64) -> Option<usize> {
        if grid_id < 0 {
            return None;
        }
        let idx = grid_id as u64;
        if idx >= self.len() as u64 {
            return None;
        }
        Some(idx as usize)
    }

    /// Get the gridID of a (row, col) cell.
    pub fn grid_id(&self, row: usize, col: usize) -> Option<i64> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some((row * self.width + col) as i64)
    }

    /// Convert a flat index back to (row, col).
    pub fn unravel(&self, flat: usize) -> Option<(usize, usize)> {
        if self.width == 0 || flat >= self.len() {
            return None;
        }
        Some((flat / self.width, flat % self.width))
    }
}

/// The 2D domain defined by a mask source's coordinate vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDomain {
    /// X coordinate of each column
    pub x: Vec<f64>,
    /// Y coordinate of each row
    pub y: Vec<f64>,
}

impl GridDomain {
    /// Create a new domain from its coordinate vectors.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y }
    }

    /// Shape of the domain (`height = len(y)`, `width = len(x)`).
    pub fn shape(&self) -> GridShape {
        GridShape::new(self.y.len(), self.x.len())
    }

    /// Spacing between the first two x coordinates, if there are at least two.
    pub fn x_resolution(&self) -> Option<f64> {
        resolution(&self.x)
    }

    /// Spacing between the first two y coordinates, if there are at least two.
    pub fn y_resolution(&self) -> Option<f64> {
        resolution(&self.y)
    }

    /// Coordinate extent of the domain (cell centres, not edges).
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_coords(&self.x, &self.y)
    }
}

fn resolution(coords: &[f64]) -> Option<f64> {
    if coords.len() < 2 {
        return None;
    }
    Some(coords[1] - coords[0])
}
