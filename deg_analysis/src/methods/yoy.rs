//! Year-over-year differencing
//!
//! For every masked sample whose date plus 365 days is also a masked
//! sample, takes the difference between the later and earlier value. The
//! median of the difference set is the annualized rate; the full set is
//! kept for histogramming.

use super::YoyOutput;
use crate::error::{AnalysisError, Result};
use chrono::{Duration, NaiveDate};
use pv_data::{Mask, SystemSeries};
use pv_math::stats::median;
use std::collections::BTreeMap;

const LAG_DAYS: i64 = 365;

pub fn run(series: &SystemSeries, mask: &Mask) -> Result<YoyOutput> {
    let valid: BTreeMap<NaiveDate, f64> = mask.select_power(series)?.into_iter().collect();

    let mut differences = Vec::new();
    for (&date, &value) in &valid {
        if let Some(&later) = valid.get(&(date + Duration::days(LAG_DAYS))) {
            differences.push(later - value);
        }
    }

    if differences.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "No 365-day-separated sample pairs".to_string(),
        ));
    }

    let rate = median(&differences)?;
    Ok(YoyOutput { differences, rate })
}
