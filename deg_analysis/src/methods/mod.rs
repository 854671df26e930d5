//! Degradation estimation methods
//!
//! One module per method, all consuming the masked view of a series and
//! producing a strongly typed output: a transformed series for plotting
//! plus the annualized rate (Wh/W per year) behind it. Dispatch goes
//! through the [`Method`] tag, never through column or string names.

use crate::error::{AnalysisError, Result};
use chrono::NaiveDate;
use pv_data::{Mask, SystemSeries};
use serde::{Deserialize, Serialize};

pub mod csd;
pub mod lowess;
pub mod ols;
pub mod rolling;
pub mod yoy;

/// Days per year used to annualize daily slopes.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// The available degradation estimation methods.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Trailing 90-day rolling mean, trendline over the smoothed series
    RollingMean,
    /// Ordinary least squares trendline over the masked series
    Ols,
    /// Classical additive seasonal decomposition, trendline over its trend
    Csd,
    /// Locally weighted scatterplot smoothing, trendline over the result
    Lowess,
    /// Year-over-year differencing, median of the 365-day differences
    Yoy,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::RollingMean,
        Method::Ols,
        Method::Csd,
        Method::Lowess,
        Method::Yoy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Method::RollingMean => "rolling-mean",
            Method::Ols => "ols",
            Method::Csd => "seasonal-decomposition",
            Method::Lowess => "lowess",
            Method::Yoy => "yoy",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Method {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rolling-mean" => Ok(Method::RollingMean),
            "ols" => Ok(Method::Ols),
            "seasonal-decomposition" => Ok(Method::Csd),
            "lowess" => Ok(Method::Lowess),
            "yoy" => Ok(Method::Yoy),
            other => Err(AnalysisError::InvalidRequest(format!(
                "Unknown method name: {}",
                other
            ))),
        }
    }
}

/// A dated point of a transformed series.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// A transformed series for the time plot plus its annualized rate.
#[derive(Debug, Clone, Serialize)]
pub struct TrendOutput {
    pub method: Method,
    pub series: Vec<DatedValue>,
    /// Annualized slope, Wh/W per year
    pub rate: f64,
}

/// Trend/seasonal/residual components plus the rate of the trend.
#[derive(Debug, Clone, Serialize)]
pub struct DecompositionOutput {
    pub trend: Vec<DatedValue>,
    pub seasonal: Vec<DatedValue>,
    pub residual: Vec<DatedValue>,
    /// Annualized slope of the trend component, Wh/W per year
    pub rate: f64,
}

/// The full set of 365-day differences plus their median.
#[derive(Debug, Clone, Serialize)]
pub struct YoyOutput {
    pub differences: Vec<f64>,
    /// Median difference, Wh/W per year
    pub rate: f64,
}

impl YoyOutput {
    /// Histogram of the difference set for the distribution chart.
    pub fn histogram(&self, bins: usize) -> Result<pv_math::stats::Histogram> {
        Ok(pv_math::stats::histogram(&self.differences, bins)?)
    }
}

/// The typed result of running one method on one system.
#[derive(Debug, Clone, Serialize)]
pub enum MethodOutput {
    Trend(TrendOutput),
    Decomposition(DecompositionOutput),
    YearOverYear(YoyOutput),
}

impl MethodOutput {
    /// The annualized degradation rate this output carries.
    pub fn rate(&self) -> f64 {
        match self {
            MethodOutput::Trend(t) => t.rate,
            MethodOutput::Decomposition(d) => d.rate,
            MethodOutput::YearOverYear(y) => y.rate,
        }
    }
}

/// Run `method` on the masked view of `series`.
pub fn run(method: Method, series: &SystemSeries, mask: &Mask) -> Result<MethodOutput> {
    match method {
        Method::RollingMean => rolling::run(series, mask).map(MethodOutput::Trend),
        Method::Ols => ols::run(series, mask).map(MethodOutput::Trend),
        Method::Csd => csd::run(series, mask).map(MethodOutput::Decomposition),
        Method::Lowess => lowess::run(series, mask).map(MethodOutput::Trend),
        Method::Yoy => yoy::run(series, mask).map(MethodOutput::YearOverYear),
    }
}

/// The masked samples as (dates, day offsets from the first valid date,
/// values). Every method starts here, so the mask is applied exactly once
/// and offsets share one origin.
pub(crate) fn masked_day_offsets(
    series: &SystemSeries,
    mask: &Mask,
) -> Result<(Vec<NaiveDate>, Vec<i64>, Vec<f64>)> {
    let valid = mask.select_power(series)?;
    if valid.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "No samples survive the mask".to_string(),
        ));
    }

    let origin = valid[0].0;
    let mut dates = Vec::with_capacity(valid.len());
    let mut offsets = Vec::with_capacity(valid.len());
    let mut values = Vec::with_capacity(valid.len());
    for (date, value) in valid {
        dates.push(date);
        offsets.push(date.signed_duration_since(origin).num_days());
        values.push(value);
    }
    Ok((dates, offsets, values))
}
