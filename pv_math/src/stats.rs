//! Order statistics and binning helpers for rate distributions

use crate::{MathError, Result};
use serde::Serialize;

/// Median of a set of values.
///
/// Averages the two central values for even-length input. Fails on empty
/// input rather than returning NaN.
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Median of an empty set is undefined".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid])
    } else {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// A histogram over equal-width bins.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// Bin boundaries, `bin_count + 1` ascending edges.
    pub edges: Vec<f64>,
    /// Sample count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    /// Inclusive-exclusive range of bin `i`; the last bin is closed on both
    /// ends so the maximum value lands inside it.
    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        (self.edges[i], self.edges[i + 1])
    }
}

/// Build a histogram of `values` over `bins` equal-width bins spanning
/// the observed min..max range.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(MathError::InvalidInput(
            "Histogram needs at least one bin".to_string(),
        ));
    }
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Histogram of an empty set is undefined".to_string(),
        ));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Histogram input must be finite".to_string(),
        ));
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let width = if max > min {
        (max - min) / bins as f64
    } else {
        // all values identical: a single degenerate span, everything in bin 0
        1.0
    };

    let edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut idx = ((v - min) / width) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        counts[idx] += 1;
    }

    Ok(Histogram { edges, counts })
}

/// Assign each value to one of `bins` equal-width bins over min..max,
/// returning the bin index per value. Used for slicing a cohort by a
/// continuous attribute such as system size.
pub fn bin_indices(values: &[f64], bins: usize) -> Result<Vec<usize>> {
    let hist = histogram(values, bins)?;
    let min = hist.edges[0];
    let width = hist.edges[1] - hist.edges[0];
    Ok(values
        .iter()
        .map(|&v| (((v - min) / width) as usize).min(bins - 1))
        .collect())
}
