//! Smoothing transforms: time-windowed rolling mean and LOWESS
//!
//! The rolling mean windows over elapsed time rather than sample count, so
//! it behaves the same on regular and irregular series. LOWESS smooths over
//! integer sample positions.

use crate::stats::median;
use crate::{MathError, Result};

/// Trailing mean over a fixed window of elapsed time.
///
/// `offsets` are integer time offsets (for daily data, day offsets from the
/// first sample) and must be strictly increasing. Position i averages every
/// sample whose offset lies in `(offsets[i] - window, offsets[i]]`, so early
/// positions average over whatever partial window exists, so there is no
/// leading gap in the output.
pub fn rolling_time_mean(offsets: &[i64], values: &[f64], window: i64) -> Result<Vec<f64>> {
    if offsets.len() != values.len() {
        return Err(MathError::InvalidInput(format!(
            "offset and value lengths differ: {} vs {}",
            offsets.len(),
            values.len()
        )));
    }
    if window <= 0 {
        return Err(MathError::InvalidInput(
            "Window must be a positive number of time units".to_string(),
        ));
    }
    if offsets.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::InvalidInput(
            "Offsets must be strictly increasing".to_string(),
        ));
    }

    let mut out = Vec::with_capacity(values.len());
    let mut start = 0usize;
    let mut sum = 0.0;
    for i in 0..values.len() {
        sum += values[i];
        while offsets[start] <= offsets[i] - window {
            sum -= values[start];
            start += 1;
        }
        out.push(sum / (i - start + 1) as f64);
    }

    Ok(out)
}

/// Locally weighted scatterplot smoothing over sample positions 0..n-1.
///
/// Tricube-weighted local linear regression with `iterations` bisquare
/// robustifying passes. `frac` is the fraction of the data used for each
/// local fit. Returns one smoothed value per input sample, in input order.
pub fn lowess(values: &[f64], frac: f64, iterations: usize) -> Result<Vec<f64>> {
    let n = values.len();
    if n < 2 {
        return Err(MathError::InsufficientData(
            "Need at least 2 points for LOWESS".to_string(),
        ));
    }
    if frac <= 0.0 || frac > 1.0 {
        return Err(MathError::InvalidInput(
            "Smoothing fraction must be in (0, 1]".to_string(),
        ));
    }

    let span = ((frac * n as f64).ceil() as usize).clamp(2, n);
    let mut robustness = vec![1.0; n];
    let mut smoothed = vec![0.0; n];

    for pass in 0..=iterations {
        for i in 0..n {
            let lo = neighbor_window_start(i, span, n);
            let hi = lo + span - 1;
            let x_i = i as f64;
            let d_max = (x_i - lo as f64).max(hi as f64 - x_i).max(1.0);

            // Weighted least squares over the local window
            let mut w_sum = 0.0;
            let mut wx = 0.0;
            let mut wy = 0.0;
            let mut wxx = 0.0;
            let mut wxy = 0.0;
            for j in lo..=hi {
                let d = ((j as f64) - x_i).abs() / d_max;
                let w = tricube(d) * robustness[j];
                if w <= 0.0 {
                    continue;
                }
                let x = j as f64;
                w_sum += w;
                wx += w * x;
                wy += w * values[j];
                wxx += w * x * x;
                wxy += w * x * values[j];
            }

            if w_sum <= 0.0 {
                // every neighbor was downweighted to zero
                smoothed[i] = values[i];
                continue;
            }

            let x_mean = wx / w_sum;
            let y_mean = wy / w_sum;
            let var_x = wxx / w_sum - x_mean * x_mean;
            smoothed[i] = if var_x.abs() < 1e-10 {
                y_mean
            } else {
                let cov_xy = wxy / w_sum - x_mean * y_mean;
                let slope = cov_xy / var_x;
                y_mean + slope * (x_i - x_mean)
            };
        }

        if pass < iterations {
            let abs_residuals: Vec<f64> = values
                .iter()
                .zip(smoothed.iter())
                .map(|(v, s)| (v - s).abs())
                .collect();
            let scale = median(&abs_residuals)?;
            if scale <= 0.0 {
                break;
            }
            for j in 0..n {
                robustness[j] = bisquare(abs_residuals[j] / (6.0 * scale));
            }
        }
    }

    Ok(smoothed)
}

/// First index of the contiguous window of `span` positions nearest to `i`.
fn neighbor_window_start(i: usize, span: usize, n: usize) -> usize {
    let half = (span - 1) / 2;
    let lo = i.saturating_sub(half);
    lo.min(n - span)
}

fn tricube(d: f64) -> f64 {
    if d >= 1.0 {
        0.0
    } else {
        let t = 1.0 - d * d * d;
        t * t * t
    }
}

fn bisquare(u: f64) -> f64 {
    if u >= 1.0 {
        0.0
    } else {
        let t = 1.0 - u * u;
        t * t
    }
}
