//! Ordinary least squares trend extraction
//!
//! Fits a line through the masked samples against day offsets from the
//! first valid date, then predicts a fitted value for every date of the
//! original series, extrapolating with the same line outside the fit
//! window.

use super::{masked_day_offsets, DatedValue, Method, TrendOutput, DAYS_PER_YEAR};
use crate::error::Result;
use pv_data::{Mask, SystemSeries};
use pv_math::regression::OlsFit;

pub fn run(series: &SystemSeries, mask: &Mask) -> Result<TrendOutput> {
    let (dates, offsets, values) = masked_day_offsets(series, mask)?;

    let xs: Vec<f64> = offsets.iter().map(|&o| o as f64).collect();
    let fit = OlsFit::fit(&xs, &values)?;

    let origin = dates[0];
    let fitted = series
        .dates()
        .into_iter()
        .map(|date| DatedValue {
            date,
            value: fit.predict(date.signed_duration_since(origin).num_days() as f64),
        })
        .collect();

    Ok(TrendOutput {
        method: Method::Ols,
        series: fitted,
        rate: fit.slope() * DAYS_PER_YEAR,
    })
}
