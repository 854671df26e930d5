//! LOWESS smoothing
//!
//! Locally weighted scatterplot smoothing over integer sample positions,
//! not calendar time, with the conventional 2/3 smoothing fraction and
//! three robustifying passes. The reported rate is the OLS slope of the
//! smoothed series against day offsets, annualized.

use super::{masked_day_offsets, DatedValue, Method, TrendOutput, DAYS_PER_YEAR};
use crate::error::Result;
use pv_data::{Mask, SystemSeries};
use pv_math::regression::OlsFit;
use pv_math::smoothing::lowess;

const FRACTION: f64 = 2.0 / 3.0;
const ROBUSTNESS_PASSES: usize = 3;

pub fn run(series: &SystemSeries, mask: &Mask) -> Result<TrendOutput> {
    let (dates, offsets, values) = masked_day_offsets(series, mask)?;

    let smoothed = lowess(&values, FRACTION, ROBUSTNESS_PASSES)?;

    let xs: Vec<f64> = offsets.iter().map(|&o| o as f64).collect();
    let fit = OlsFit::fit(&xs, &smoothed)?;

    let out = dates
        .into_iter()
        .zip(smoothed)
        .map(|(date, value)| DatedValue { date, value })
        .collect();

    Ok(TrendOutput {
        method: Method::Lowess,
        series: out,
        rate: fit.slope() * DAYS_PER_YEAR,
    })
}
