//! Valid-sample masking
//!
//! A mask marks the samples of a series that fall inside user-supplied
//! insolation and production bounds. Every analysis method consumes only
//! the masked view of a series, so the mask is always computed first.

use crate::{DataError, Result, SystemSeries};
use chrono::NaiveDate;
use serde::Serialize;

/// Inclusive bounds on the insolation and normalized-production channels.
///
/// Bounds come straight from user input, so the constructor rejects
/// non-finite values and inverted intervals before any masking happens.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ValidBounds {
    insol_low: f64,
    insol_high: f64,
    prod_low: f64,
    prod_high: f64,
}

impl ValidBounds {
    pub fn new(insol_low: f64, insol_high: f64, prod_low: f64, prod_high: f64) -> Result<Self> {
        for (name, value) in [
            ("insolation low", insol_low),
            ("insolation high", insol_high),
            ("production low", prod_low),
            ("production high", prod_high),
        ] {
            if !value.is_finite() {
                return Err(DataError::InvalidBounds(format!(
                    "{} bound must be a finite number",
                    name
                )));
            }
        }
        if insol_low > insol_high {
            return Err(DataError::InvalidBounds(format!(
                "Insolation bounds are inverted: {} > {}",
                insol_low, insol_high
            )));
        }
        if prod_low > prod_high {
            return Err(DataError::InvalidBounds(format!(
                "Production bounds are inverted: {} > {}",
                prod_low, prod_high
            )));
        }

        Ok(Self {
            insol_low,
            insol_high,
            prod_low,
            prod_high,
        })
    }

    /// Compute the mask of `series` under these bounds.
    ///
    /// One boolean per sample: true iff both channels are present and
    /// inside their closed intervals. Missing channels are false. The
    /// series itself is untouched.
    pub fn mask(&self, series: &SystemSeries) -> Mask {
        let bits = series
            .samples()
            .iter()
            .map(|s| match (s.insolation, s.power_norm) {
                (Some(insol), Some(prod)) => {
                    insol >= self.insol_low
                        && insol <= self.insol_high
                        && prod >= self.prod_low
                        && prod <= self.prod_high
                }
                _ => false,
            })
            .collect();
        Mask { bits }
    }
}

/// A boolean filter aligned 1:1 with a series.
#[derive(Debug, Clone)]
pub struct Mask {
    bits: Vec<bool>,
}

impl Mask {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of samples passing the filter.
    pub fn valid_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// The (date, normalized power) pairs of the masked-in samples.
    ///
    /// Fails if the mask was built for a series of a different length.
    pub fn select_power(&self, series: &SystemSeries) -> Result<Vec<(NaiveDate, f64)>> {
        if self.bits.len() != series.len() {
            return Err(DataError::InvalidData(format!(
                "Mask length {} does not match series length {}",
                self.bits.len(),
                series.len()
            )));
        }
        Ok(series
            .samples()
            .iter()
            .zip(self.bits.iter())
            .filter(|(_, &keep)| keep)
            .filter_map(|(s, _)| s.power_norm.map(|p| (s.date, p)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PerformanceSample;
    use chrono::NaiveDate;

    fn series(points: &[(u32, Option<f64>, Option<f64>)]) -> SystemSeries {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let samples = points
            .iter()
            .map(|&(day, power, insol)| PerformanceSample {
                date: base + chrono::Duration::days(day as i64),
                power_norm: power,
                insolation: insol,
            })
            .collect();
        SystemSeries::new(samples).unwrap()
    }

    #[test]
    fn test_mask_length_matches_series() {
        let s = series(&[
            (0, Some(1.0), Some(500.0)),
            (1, Some(0.9), Some(700.0)),
            (2, None, Some(800.0)),
        ]);
        let bounds = ValidBounds::new(0.0, 1000.0, 0.0, 2.0).unwrap();
        assert_eq!(bounds.mask(&s).len(), s.len());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let s = series(&[
            (0, Some(0.5), Some(200.0)),  // both exactly at the low bounds
            (1, Some(1.5), Some(1000.0)), // both exactly at the high bounds
            (2, Some(1.6), Some(600.0)),  // production just above
            (3, Some(1.0), Some(199.9)),  // insolation just below
        ]);
        let bounds = ValidBounds::new(200.0, 1000.0, 0.5, 1.5).unwrap();
        let mask = bounds.mask(&s);
        assert_eq!(mask.bits(), &[true, true, false, false]);
    }

    #[test]
    fn test_missing_channels_are_excluded() {
        let s = series(&[
            (0, None, Some(500.0)),
            (1, Some(1.0), None),
            (2, None, None),
            (3, Some(1.0), Some(500.0)),
        ]);
        let bounds = ValidBounds::new(0.0, 1000.0, 0.0, 2.0).unwrap();
        let mask = bounds.mask(&s);
        assert_eq!(mask.bits(), &[false, false, false, true]);
        assert_eq!(mask.valid_count(), 1);
    }

    #[test]
    fn test_rejects_inverted_and_non_finite_bounds() {
        assert!(ValidBounds::new(100.0, 50.0, 0.0, 1.0).is_err());
        assert!(ValidBounds::new(0.0, 100.0, 1.0, 0.5).is_err());
        assert!(ValidBounds::new(f64::NAN, 100.0, 0.0, 1.0).is_err());
        assert!(ValidBounds::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_select_power_returns_masked_pairs() {
        let s = series(&[
            (0, Some(1.0), Some(500.0)),
            (1, Some(5.0), Some(500.0)), // production out of bounds
            (2, Some(0.8), Some(500.0)),
        ]);
        let bounds = ValidBounds::new(0.0, 1000.0, 0.0, 2.0).unwrap();
        let pairs = bounds.mask(&s).select_power(&s).unwrap();

        assert_eq!(pairs.len(), 2);
        assert!((pairs[0].1 - 1.0).abs() < 1e-12);
        assert!((pairs[1].1 - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_select_power_rejects_length_mismatch() {
        let s1 = series(&[(0, Some(1.0), Some(500.0))]);
        let s2 = series(&[(0, Some(1.0), Some(500.0)), (1, Some(1.0), Some(500.0))]);
        let bounds = ValidBounds::new(0.0, 1000.0, 0.0, 2.0).unwrap();
        let mask = bounds.mask(&s1);
        assert!(mask.select_power(&s2).is_err());
    }
}
