//! Ordinary least squares fitting for trend extraction
//!
//! A single-variable linear regression used to turn a smoothed or raw
//! performance series into a daily slope, which callers annualize into a
//! degradation rate.

use crate::{MathError, Result};
use serde::Serialize;

/// A line fitted through (x, y) pairs by ordinary least squares.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OlsFit {
    slope: f64,
    intercept: f64,
}

impl OlsFit {
    /// Fit a line through the given points.
    ///
    /// Requires at least 2 points with at least 2 distinct x values;
    /// fitting fewer is undefined and fails rather than returning a
    /// degenerate line.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::InvalidInput(format!(
                "x and y lengths differ: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(MathError::InsufficientData(
                "Need at least 2 points for linear regression".to_string(),
            ));
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        Ok(Self { slope, intercept })
    }

    /// Slope of the fitted line (change in y per unit x).
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Intercept of the fitted line at x = 0.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predicted value at `x`, extrapolating freely outside the fit window.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Predicted values for a whole axis of x positions.
    pub fn predict_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Coefficient of determination of this fit against (xs, ys).
    pub fn r_squared(&self, xs: &[f64], ys: &[f64]) -> Result<f64> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return Err(MathError::InsufficientData(
                "Need at least 2 points to calculate R-squared".to_string(),
            ));
        }

        let y_mean = ys.iter().sum::<f64>() / ys.len() as f64;

        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let y_pred = self.predict(x);
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - y_pred).powi(2);
        }

        if ss_total.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate R-squared: total sum of squares is too small".to_string(),
            ));
        }

        Ok(1.0 - (ss_residual / ss_total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_line() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [1.0, 3.0, 5.0, 7.0];
        let fit = OlsFit::fit(&xs, &ys).unwrap();

        assert!((fit.slope() - 2.0).abs() < 1e-12);
        assert!((fit.intercept() - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-12);
        assert!(fit.r_squared(&xs, &ys).unwrap() > 0.999);
    }

    #[test]
    fn test_matches_closed_form() {
        // Independent closed-form solution: slope = cov(x, y) / var(x).
        let xs = [0.0, 3.0, 7.0, 12.0, 20.0];
        let ys = [0.95, 0.91, 0.93, 0.88, 0.85];
        let fit = OlsFit::fit(&xs, &ys).unwrap();

        let n = xs.len() as f64;
        let sx: f64 = xs.iter().sum();
        let sy: f64 = ys.iter().sum();
        let sxy: f64 = xs.iter().zip(ys.iter()).map(|(x, y)| x * y).sum();
        let sxx: f64 = xs.iter().map(|x| x * x).sum();
        let expected = (n * sxy - sx * sy) / (n * sxx - sx * sx);

        assert!((fit.slope() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_points() {
        assert!(OlsFit::fit(&[1.0], &[2.0]).is_err());
        assert!(OlsFit::fit(&[], &[]).is_err());
    }

    #[test]
    fn test_degenerate_x_axis() {
        // All x identical: slope is undefined.
        let result = OlsFit::fit(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]);
        assert!(result.is_err());
    }
}
