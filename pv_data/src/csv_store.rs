//! Directory-backed CSV store
//!
//! A concrete [`SeriesStore`] over a directory of files: one `<id>.csv`
//! per system holding its daily series, plus a `metadata.csv` table of
//! static attributes. Doubles as a fixture writer for tests and demos.

use crate::store::SeriesStore;
use crate::{DataError, PerformanceSample, Result, SystemId, SystemMetadata, SystemSeries};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const METADATA_FILE: &str = "metadata.csv";

#[derive(Debug, Serialize, Deserialize)]
struct SeriesRow {
    date: NaiveDate,
    power_norm: Option<f64>,
    insolation: Option<f64>,
}

/// A store reading series and metadata from CSV files in one directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn series_path(&self, id: SystemId) -> PathBuf {
        self.dir.join(format!("{}.csv", id))
    }

    fn read_series(&self, path: &Path) -> Result<SystemSeries> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut samples = Vec::new();
        for row in reader.deserialize() {
            let row: SeriesRow = row?;
            samples.push(PerformanceSample {
                date: row.date,
                power_norm: row.power_norm,
                insolation: row.insolation,
            });
        }
        SystemSeries::new(samples)
    }

    /// Write a system's series as `<id>.csv`, replacing any existing file.
    pub fn write_series(&self, id: SystemId, series: &SystemSeries) -> Result<()> {
        let mut writer = csv::Writer::from_path(self.series_path(id))?;
        for sample in series.samples() {
            writer.serialize(SeriesRow {
                date: sample.date,
                power_norm: sample.power_norm,
                insolation: sample.insolation,
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write the metadata table as `metadata.csv`.
    pub fn write_metadata(&self, metadata: &[SystemMetadata]) -> Result<()> {
        let mut writer = csv::Writer::from_path(self.dir.join(METADATA_FILE))?;
        for row in metadata {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SeriesStore for CsvStore {
    fn fetch_series(&self, ids: &[SystemId]) -> Result<BTreeMap<SystemId, SystemSeries>> {
        let mut out = BTreeMap::new();
        for &id in ids {
            let path = self.series_path(id);
            // a system with no file is unknown, not an error
            if !path.exists() {
                continue;
            }
            out.insert(id, self.read_series(&path)?);
        }
        Ok(out)
    }

    fn fetch_metadata(&self) -> Result<Vec<SystemMetadata>> {
        let path = self.dir.join(METADATA_FILE);
        if !path.exists() {
            return Err(DataError::Store(format!(
                "Metadata table not found at {}",
                path.display()
            )));
        }
        let mut reader = csv::Reader::from_path(&path)?;
        let mut metadata = Vec::new();
        for row in reader.deserialize() {
            metadata.push(row?);
        }
        Ok(metadata)
    }
}
