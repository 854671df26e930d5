//! # PV Data
//!
//! `pv_data` is the data layer of the degradation analytics workspace. It
//! holds the domain model for photovoltaic performance series (daily
//! normalized power plus plane-of-array insolation), per-system static
//! metadata, the valid-sample masking stage, and the store adapters that
//! fetch series from an external source through a bounded cache.
//!
//! ## Usage Example
//!
//! ```
//! use pv_data::mask::ValidBounds;
//! use pv_data::utils::generate_degrading_series;
//!
//! // Synthesize a degrading system and mask out low-light samples
//! let series = generate_degrading_series(730, 0.95, -0.02, 0.01, 7);
//! let bounds = ValidBounds::new(200.0, 1400.0, 0.0, 2.0).unwrap();
//! let mask = bounds.mask(&series);
//!
//! assert_eq!(mask.len(), series.len());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod csv_store;
pub mod mask;
pub mod store;
pub mod utils;

pub use csv_store::CsvStore;
pub use mask::{Mask, ValidBounds};
pub use store::{CachingStore, MemoryStore, SeriesCache, SeriesStore};

/// Errors that can occur in the data layer
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err.to_string())
    }
}

/// Result type for data-layer operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Unique identifier of a photovoltaic system.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SystemId(pub u32);

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One day of performance data for a system.
///
/// `None` models a missing observation in either channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PerformanceSample {
    /// Date of the observation
    pub date: NaiveDate,
    /// Normalized production power (Wh/W)
    pub power_norm: Option<f64>,
    /// Plane-of-array insolation (W/m^2)
    pub insolation: Option<f64>,
}

/// A system's daily performance history, ordered by date.
///
/// Dates are strictly increasing; the constructor rejects anything else.
/// Transforms treat the series as read-only and build new vectors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSeries {
    samples: Vec<PerformanceSample>,
}

impl SystemSeries {
    /// Create a series from samples, which must be in strictly
    /// increasing date order with no duplicate dates.
    pub fn new(samples: Vec<PerformanceSample>) -> Result<Self> {
        for pair in samples.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(DataError::InvalidData(format!(
                    "Sample dates must be strictly increasing: {} then {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        Ok(Self { samples })
    }

    /// An all-missing daily series spanning `start..=end`, for plotting
    /// an empty chart when no system is selected.
    pub fn placeholder(start: NaiveDate, end: NaiveDate) -> Self {
        let mut samples = Vec::new();
        let mut date = start;
        while date <= end {
            samples.push(PerformanceSample {
                date,
                power_norm: None,
                insolation: None,
            });
            date += chrono::Duration::days(1);
        }
        Self { samples }
    }

    pub fn samples(&self) -> &[PerformanceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.samples.first().map(|s| s.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.samples.last().map(|s| s.date)
    }

    /// All sample dates, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.samples.iter().map(|s| s.date).collect()
    }
}

/// Static attributes of a system, loaded once from the metadata store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetadata {
    pub id: SystemId,
    pub system_name: String,
    pub state: String,
    pub county: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Nameplate size in watts
    pub system_size_w: f64,
    /// Days with recorded production
    pub active_days: u32,
}

impl SystemMetadata {
    /// Hover-text summary used when pointing at a system on the map.
    pub fn label(&self) -> String {
        format!(
            "{} -- {} / {}, {} / {}W system / Active for {} days",
            self.id,
            self.system_name,
            self.county,
            self.state,
            self.system_size_w,
            self.active_days
        )
    }
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(y: i32, m: u32, d: u32) -> PerformanceSample {
        PerformanceSample {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            power_norm: Some(1.0),
            insolation: Some(900.0),
        }
    }

    #[test]
    fn test_series_rejects_unordered_dates() {
        let result = SystemSeries::new(vec![sample(2020, 1, 2), sample(2020, 1, 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_series_rejects_duplicate_dates() {
        let result = SystemSeries::new(vec![sample(2020, 1, 1), sample(2020, 1, 1)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_placeholder_spans_range() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap();
        let filler = SystemSeries::placeholder(start, end);

        assert_eq!(filler.len(), 10);
        assert!(filler.samples().iter().all(|s| s.power_norm.is_none()));
        assert_eq!(filler.first_date(), Some(start));
        assert_eq!(filler.last_date(), Some(end));
    }

    #[test]
    fn test_metadata_label() {
        let meta = SystemMetadata {
            id: SystemId(42),
            system_name: "Mesa Verde".to_string(),
            state: "CA".to_string(),
            county: "Kern".to_string(),
            latitude: 35.3,
            longitude: -118.9,
            system_size_w: 5000.0,
            active_days: 1200,
        };
        assert_eq!(
            meta.label(),
            "42 -- Mesa Verde / Kern, CA / 5000W system / Active for 1200 days"
        );
    }
}
