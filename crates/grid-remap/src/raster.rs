//! Dense row-major rasters.

use grid_common::{GridError, GridResult, GridShape};
use std::ops::Range;

/// A dense `height × width` raster in row-major order (row 0 first).
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    height: usize,
    width: usize,
    data: Vec<T>,
}

impl<T: Copy> Raster<T> {
    /// Create a raster with every cell set to `value`.
    pub fn filled(shape: GridShape, value: T) -> Self {
        Self {
            height: shape.height,
            width: shape.width,
            data: vec![value; shape.len()],
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(shape: GridShape, data: Vec<T>) -> GridResult<Self> {
        if data.len() != shape.len() {
            return Err(GridError::config(format!(
                "raster buffer holds {} cells, shape {}x{} needs {}",
                data.len(),
                shape.height,
                shape.width,
                shape.len()
            )));
        }
        Ok(Self {
            height: shape.height,
            width: shape.width,
            data,
        })
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.height, self.width)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The flat row-major buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Get the value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.data[row * self.width + col])
    }

    /// Get the value at a flat index.
    pub fn get_flat(&self, flat: usize) -> Option<T> {
        self.data.get(flat).copied()
    }

    /// Mutable access to the flat buffer, for scatter writes.
    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Borrow one row.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.data[start..start + self.width])
    }

    /// Copy the raster into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height];
        }
        self.data.chunks(self.width).map(|r| r.to_vec()).collect()
    }

    /// Reverse the row order (row 0 becomes the last row).
    pub fn flip_rows(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for row in (0..self.height).rev() {
            let start = row * self.width;
            data.extend_from_slice(&self.data[start..start + self.width]);
        }
        Self {
            height: self.height,
            width: self.width,
            data,
        }
    }

    /// Copy out the cells in the given 0-based row and column ranges.
    ///
    /// Ranges must already lie within the raster.
    pub(crate) fn crop(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        let width = cols.len();
        let mut data = Vec::with_capacity(rows.len() * width);
        for row in rows.clone() {
            let start = row * self.width;
            data.extend_from_slice(&self.data[start + cols.start..start + cols.end]);
        }
        Self {
            height: rows.len(),
            width,
            data,
        }
    }

    /// Apply a function to every cell.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Raster<U> {
        Raster {
            height: self.height,
            width: self.width,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Count the cells matching a predicate.
    pub fn count_where(&self, pred: impl Fn(T) -> bool) -> usize {
        self.data.iter().filter(|&&v| pred(v)).count()
    }
}

impl Raster<f64> {
    /// Minimum and maximum over non-NaN cells.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied().filter(|v| !v.is_nan());
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Raster<i32> {
        Raster::from_vec(GridShape::new(3, 2), vec![1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Raster::from_vec(GridShape::new(2, 2), vec![0u8; 3]).is_err());
    }

    #[test]
    fn test_get_and_row() {
        let r = sample();
        assert_eq!(r.get(2, 1), Some(6));
        assert_eq!(r.get(3, 0), None);
        assert_eq!(r.row(1), Some(&[3, 4][..]));
    }

    #[test]
    fn test_flip_rows() {
        let flipped = sample().flip_rows();
        assert_eq!(flipped.to_rows(), vec![vec![5, 6], vec![3, 4], vec![1, 2]]);
        assert_eq!(flipped.flip_rows(), sample());
    }

    #[test]
    fn test_crop() {
        let cropped = sample().crop(1..3, 1..2);
        assert_eq!(cropped.to_rows(), vec![vec![4], vec![6]]);
    }

    #[test]
    fn test_value_range_skips_nan() {
        let r = Raster::from_vec(GridShape::new(1, 3), vec![f64::NAN, 2.0, -1.0]).unwrap();
        assert_eq!(r.value_range(), Some((-1.0, 2.0)));
        let empty = Raster::filled(GridShape::new(1, 2), f64::NAN);
        assert_eq!(empty.value_range(), None);
    }
}
