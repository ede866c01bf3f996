//! Synthetic gridID lists and per-cell values.
//!
//! Values are derived from the gridID itself so a test can check where a
//! value landed just by looking at it.

/// Value assigned to a cell by [`values_for_ids`].
///
/// `grid_id * 10 + 0.5`, so that no generated value equals 0 or a common fill.
pub fn value_for_id(grid_id: i64) -> f64 {
    grid_id as f64 * 10.0 + 0.5
}

/// One value per gridID using [`value_for_id`].
pub fn values_for_ids(grid_ids: &[i64]) -> Vec<f64> {
    grid_ids.iter().map(|&id| value_for_id(id)).collect()
}

/// Active cells in a checkerboard pattern, row-major order.
///
/// Cell `(row, col)` is active when `row + col` is even.
///
/// # Example
///
/// ```
/// use test_utils::checkerboard_grid_ids;
///
/// assert_eq!(checkerboard_grid_ids(2, 3), vec![0, 2, 4]);
/// ```
pub fn checkerboard_grid_ids(height: usize, width: usize) -> Vec<i64> {
    let mut ids = Vec::new();
    for row in 0..height {
        for col in 0..width {
            if (row + col) % 2 == 0 {
                ids.push((row * width + col) as i64);
            }
        }
    }
    ids
}

/// Every `stride`-th cell of a `height × width` domain, starting at 0.
pub fn strided_grid_ids(height: usize, width: usize, stride: usize) -> Vec<i64> {
    (0..height * width)
        .step_by(stride.max(1))
        .map(|id| id as i64)
        .collect()
}

/// Deterministic reordering of a gridID list (interleaves the two halves).
///
/// GridID lists in real files are not sorted; remap code must not assume they are.
pub fn interleaved(ids: &[i64]) -> Vec<i64> {
    let mid = ids.len() / 2;
    let (front, back) = ids.split_at(mid);
    let mut out = Vec::with_capacity(ids.len());
    let mut back_iter = back.iter().rev();
    for &id in front {
        if let Some(&b) = back_iter.next() {
            out.push(b);
        }
        out.push(id);
    }
    out.extend(back_iter);
    out
}

/// Evenly spaced coordinate axis: `start, start + step, ...` (`n` values).
pub fn coordinate_axis(start: f64, step: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkerboard() {
        let ids = checkerboard_grid_ids(3, 3);
        assert_eq!(ids, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_strided() {
        assert_eq!(strided_grid_ids(2, 5, 3), vec![0, 3, 6, 9]);
        assert_eq!(strided_grid_ids(1, 3, 0), vec![0, 1, 2]);
    }

    #[test]
    fn test_interleaved_is_permutation() {
        let ids: Vec<i64> = (0..7).collect();
        let mut shuffled = interleaved(&ids);
        assert_ne!(shuffled, ids);
        shuffled.sort_unstable();
        assert_eq!(shuffled, ids);
    }

    #[test]
    fn test_values_for_ids() {
        assert_eq!(values_for_ids(&[0, 3]), vec![0.5, 30.5]);
    }

    #[test]
    fn test_coordinate_axis() {
        assert_eq!(coordinate_axis(-90.0, 0.5, 3), vec![-90.0, -89.5, -89.0]);
    }
}
