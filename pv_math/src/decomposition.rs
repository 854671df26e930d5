//! Classical additive seasonal decomposition
//!
//! Splits a gap-free, regularly sampled series into trend, seasonal, and
//! residual components. For daily photovoltaic data the period is 365.

use crate::{MathError, Result};
use serde::Serialize;

/// Components of an additive decomposition: `value = trend + seasonal +
/// residual` wherever the trend is defined.
///
/// The trend is a centered moving average, so it is missing for half a
/// period at each boundary; seasonal values cover the full length.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonalDecomposition {
    pub trend: Vec<Option<f64>>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
}

impl SeasonalDecomposition {
    pub fn len(&self) -> usize {
        self.seasonal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasonal.is_empty()
    }

    /// (position, value) pairs of the defined portion of the trend.
    pub fn trend_points(&self) -> Vec<(usize, f64)> {
        self.trend
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|v| (i, v)))
            .collect()
    }
}

/// Decompose a series into additive trend/seasonal/residual components
/// with the given period.
///
/// The input must be regularly sampled with no gaps (see
/// [`crate::fill::interpolate_to_grid`]) and at least one full period
/// long; shorter input leaves every component undefined and is an error.
pub fn decompose_additive(values: &[f64], period: usize) -> Result<SeasonalDecomposition> {
    if period < 2 {
        return Err(MathError::InvalidInput(
            "Decomposition period must be at least 2".to_string(),
        ));
    }
    let n = values.len();
    if n < period {
        return Err(MathError::InsufficientData(format!(
            "Need at least one full period ({} samples) for decomposition, got {}",
            period, n
        )));
    }

    let trend = centered_moving_average(values, period);

    // Position-in-period means of the detrended series, re-centered to
    // zero so the seasonal component carries no net offset.
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, t) in trend.iter().enumerate() {
        if let Some(t) = t {
            sums[i % period] += values[i] - t;
            counts[i % period] += 1;
        }
    }

    let mut means = vec![0.0; period];
    let mut observed_total = 0.0;
    let mut observed = 0usize;
    for p in 0..period {
        if counts[p] > 0 {
            means[p] = sums[p] / counts[p] as f64;
            observed_total += means[p];
            observed += 1;
        }
    }
    let center = if observed > 0 {
        observed_total / observed as f64
    } else {
        0.0
    };
    for p in 0..period {
        if counts[p] > 0 {
            means[p] -= center;
        }
    }

    let seasonal: Vec<f64> = (0..n).map(|i| means[i % period]).collect();
    let residual: Vec<Option<f64>> = trend
        .iter()
        .enumerate()
        .map(|(i, t)| t.map(|t| values[i] - t - seasonal[i]))
        .collect();

    Ok(SeasonalDecomposition {
        trend,
        seasonal,
        residual,
    })
}

/// Centered moving average of window `period`. Even periods use the
/// standard half-weighted endpoints so the window stays centered. The
/// first and last half-window positions are undefined.
fn centered_moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let half = period / 2;
    let mut out = vec![None; n];

    if period % 2 == 1 {
        for i in half..n.saturating_sub(half) {
            let window = &values[i - half..=i + half];
            out[i] = Some(window.iter().sum::<f64>() / period as f64);
        }
    } else {
        // window spans period + 1 samples with the two endpoints at half weight
        for i in half..n.saturating_sub(half) {
            let mut sum = 0.5 * (values[i - half] + values[i + half]);
            sum += values[i - half + 1..i + half].iter().sum::<f64>();
            out[i] = Some(sum / period as f64);
        }
    }

    out
}
