//! Gap filling and grid regularization
//!
//! Seasonal decomposition cannot tolerate missing samples, so series are
//! first filled and regularized onto a contiguous integer grid. All
//! routines take slices in and hand new vectors back.

use crate::{MathError, Result};

/// Replace each missing value with the nearest earlier present value.
/// Leading missing values stay missing.
pub fn fill_forward(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    let mut last = None;
    for &v in values {
        if v.is_some() {
            last = v;
        }
        out.push(v.or(last));
    }
    out
}

/// Replace each missing value with the nearest later present value.
/// Trailing missing values stay missing.
pub fn fill_backward(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    let mut next = None;
    for i in (0..values.len()).rev() {
        if values[i].is_some() {
            next = values[i];
        }
        out[i] = values[i].or(next);
    }
    out
}

/// Resample (offset, value) points onto the contiguous integer grid
/// between the first and last offset, linearly interpolating the grid
/// positions that fall between observations.
///
/// Offsets must be strictly increasing. The output has
/// `last - first + 1` entries, one per grid position, with observed
/// values kept exactly at their own positions.
pub fn interpolate_to_grid(offsets: &[i64], values: &[f64]) -> Result<Vec<f64>> {
    if offsets.len() != values.len() {
        return Err(MathError::InvalidInput(format!(
            "offset and value lengths differ: {} vs {}",
            offsets.len(),
            values.len()
        )));
    }
    if offsets.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot regularize an empty series".to_string(),
        ));
    }
    if offsets.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::InvalidInput(
            "Offsets must be strictly increasing".to_string(),
        ));
    }

    let first = offsets[0];
    let last = offsets[offsets.len() - 1];
    let len = (last - first + 1) as usize;
    let mut out = Vec::with_capacity(len);

    let mut seg = 0usize;
    for pos in first..=last {
        while seg + 1 < offsets.len() && offsets[seg + 1] <= pos {
            seg += 1;
        }
        if offsets[seg] == pos || seg + 1 == offsets.len() {
            out.push(values[seg]);
        } else {
            let x0 = offsets[seg] as f64;
            let x1 = offsets[seg + 1] as f64;
            let t = (pos as f64 - x0) / (x1 - x0);
            out.push(values[seg] + t * (values[seg + 1] - values[seg]));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_forward() {
        let filled = fill_forward(&[None, Some(1.0), None, None, Some(4.0), None]);
        assert_eq!(
            filled,
            vec![None, Some(1.0), Some(1.0), Some(1.0), Some(4.0), Some(4.0)]
        );
    }

    #[test]
    fn test_fill_backward() {
        let filled = fill_backward(&[None, Some(1.0), None, None, Some(4.0), None]);
        assert_eq!(
            filled,
            vec![Some(1.0), Some(1.0), Some(4.0), Some(4.0), Some(4.0), None]
        );
    }

    #[test]
    fn test_backward_then_forward_leaves_no_gaps() {
        let values = [None, Some(2.0), None, Some(6.0), None];
        let filled = fill_forward(&fill_backward(&values));
        assert!(filled.iter().all(|v| v.is_some()));
    }

    #[test]
    fn test_interpolate_dense_series_is_identity() {
        let offsets: Vec<i64> = (0..5).collect();
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let grid = interpolate_to_grid(&offsets, &values).unwrap();
        assert_eq!(grid, values.to_vec());
    }

    #[test]
    fn test_interpolate_fills_interior_gap() {
        // observations at offsets 0 and 4: the grid positions between them
        // fall on the connecting line
        let grid = interpolate_to_grid(&[0, 4], &[0.0, 8.0]).unwrap();
        assert_eq!(grid.len(), 5);
        for (i, v) in grid.iter().enumerate() {
            assert!((v - 2.0 * i as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_interpolate_keeps_observed_values_exact() {
        let offsets = [3, 5, 10];
        let values = [0.9, 0.7, 0.8];
        let grid = interpolate_to_grid(&offsets, &values).unwrap();
        assert_eq!(grid.len(), 8);
        assert!((grid[0] - 0.9).abs() < 1e-12);
        assert!((grid[2] - 0.7).abs() < 1e-12);
        assert!((grid[7] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_interpolate_rejects_empty_and_unsorted() {
        assert!(interpolate_to_grid(&[], &[]).is_err());
        assert!(interpolate_to_grid(&[1, 1], &[0.0, 0.0]).is_err());
    }
}
