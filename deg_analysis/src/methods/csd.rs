//! Classical seasonal decomposition
//!
//! Regularizes the masked samples onto the contiguous daily grid between
//! the first and last valid date, linearly interpolating interior gaps,
//! then applies an additive decomposition with a 365-day period. The
//! reported rate is the OLS slope of the trend component, annualized.

use super::{masked_day_offsets, DatedValue, DecompositionOutput, DAYS_PER_YEAR};
use crate::error::Result;
use chrono::Duration;
use pv_data::{Mask, SystemSeries};
use pv_math::decomposition::decompose_additive;
use pv_math::fill::interpolate_to_grid;
use pv_math::regression::OlsFit;

const PERIOD_DAYS: usize = 365;

pub fn run(series: &SystemSeries, mask: &Mask) -> Result<DecompositionOutput> {
    let (dates, offsets, values) = masked_day_offsets(series, mask)?;

    // one entry per calendar day from the first to the last valid date
    let grid = interpolate_to_grid(&offsets, &values)?;
    let decomposed = decompose_additive(&grid, PERIOD_DAYS)?;

    let trend_points = decomposed.trend_points();
    let xs: Vec<f64> = trend_points.iter().map(|&(i, _)| i as f64).collect();
    let ys: Vec<f64> = trend_points.iter().map(|&(_, v)| v).collect();
    let fit = OlsFit::fit(&xs, &ys)?;

    let origin = dates[0];
    let grid_date = |i: usize| origin + Duration::days(i as i64);

    let trend = trend_points
        .iter()
        .map(|&(i, value)| DatedValue {
            date: grid_date(i),
            value,
        })
        .collect();
    let seasonal = decomposed
        .seasonal
        .iter()
        .enumerate()
        .map(|(i, &value)| DatedValue {
            date: grid_date(i),
            value,
        })
        .collect();
    let residual = decomposed
        .residual
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            r.map(|value| DatedValue {
                date: grid_date(i),
                value,
            })
        })
        .collect();

    Ok(DecompositionOutput {
        trend,
        seasonal,
        residual,
        rate: fit.slope() * DAYS_PER_YEAR,
    })
}
