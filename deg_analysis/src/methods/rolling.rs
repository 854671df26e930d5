//! Rolling-mean smoothing
//!
//! A trailing mean over 90 days of elapsed calendar time, so irregular
//! and gap-ridden series window correctly. The reported rate is the OLS
//! slope of the smoothed series, annualized.

use super::{masked_day_offsets, DatedValue, Method, TrendOutput, DAYS_PER_YEAR};
use crate::error::Result;
use pv_data::{Mask, SystemSeries};
use pv_math::regression::OlsFit;
use pv_math::smoothing::rolling_time_mean;

const WINDOW_DAYS: i64 = 90;

pub fn run(series: &SystemSeries, mask: &Mask) -> Result<TrendOutput> {
    let (dates, offsets, values) = masked_day_offsets(series, mask)?;

    let smoothed = rolling_time_mean(&offsets, &values, WINDOW_DAYS)?;

    let xs: Vec<f64> = offsets.iter().map(|&o| o as f64).collect();
    let fit = OlsFit::fit(&xs, &smoothed)?;

    let out = dates
        .into_iter()
        .zip(smoothed)
        .map(|(date, value)| DatedValue { date, value })
        .collect();

    Ok(TrendOutput {
        method: Method::RollingMean,
        series: out,
        rate: fit.slope() * DAYS_PER_YEAR,
    })
}
