//! Synthetic series and metadata generation
//!
//! Tests and demos need plausible degrading systems without a real store
//! behind them. The generators here produce daily series with a linear
//! degradation trend, seasonal insolation, Gaussian noise, and periodic
//! outage gaps, plus deterministic metadata derived from the system id.

use crate::{PerformanceSample, SystemId, SystemMetadata, SystemSeries};
use chrono::NaiveDate;
use rand::{thread_rng, Rng};
use rand_distr::{Distribution, Normal};
use std::collections::BTreeMap;

const STATES: [&str; 5] = ["AZ", "CA", "NM", "NV", "TX"];
const COUNTIES: [&str; 5] = ["Maricopa", "Kern", "Bernalillo", "Clark", "Travis"];

/// Generate a daily performance series with a linear degradation trend.
///
/// `days` samples starting 2019-01-01. Normalized power starts at
/// `starting_power` and changes by `annual_rate` per year (negative for
/// degradation) with Gaussian noise of `noise_std`. Insolation follows a
/// yearly sinusoid. Every `gap_every`-th sample is an outage with both
/// channels missing; 0 disables gaps.
pub fn generate_degrading_series(
    days: usize,
    starting_power: f64,
    annual_rate: f64,
    noise_std: f64,
    gap_every: usize,
) -> SystemSeries {
    let mut rng = thread_rng();
    let noise = Normal::new(0.0, noise_std).unwrap();
    let base = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();

    let mut samples = Vec::with_capacity(days);
    for i in 0..days {
        let date = base + chrono::Duration::days(i as i64);
        if gap_every > 0 && (i + 1) % gap_every == 0 {
            samples.push(PerformanceSample {
                date,
                power_norm: None,
                insolation: None,
            });
            continue;
        }

        let season = (2.0 * std::f64::consts::PI * i as f64 / 365.0).sin();
        let insolation = 950.0 + 200.0 * season + rng.gen_range(-50.0..50.0);
        let power = starting_power + annual_rate * (i as f64 / 365.0) + noise.sample(&mut rng);
        samples.push(PerformanceSample {
            date,
            power_norm: Some(power),
            insolation: Some(insolation),
        });
    }

    SystemSeries::new(samples).unwrap()
}

/// Metadata for a system, derived deterministically from its id so tests
/// can group on state and size without fixing a seed.
pub fn generate_metadata(id: SystemId, active_days: u32) -> SystemMetadata {
    let idx = id.0 as usize % STATES.len();
    SystemMetadata {
        id,
        system_name: format!("Site {}", id),
        state: STATES[idx].to_string(),
        county: COUNTIES[idx].to_string(),
        latitude: 31.0 + (id.0 % 10) as f64 * 0.8,
        longitude: -115.0 + (id.0 % 7) as f64 * 1.5,
        system_size_w: 2000.0 + (id.0 % 12) as f64 * 750.0,
        active_days,
    }
}

/// A whole cohort: `count` systems with `days` of history each, varied
/// starting power and degradation rates, and matching metadata rows.
pub fn generate_cohort(
    count: usize,
    days: usize,
) -> (Vec<SystemMetadata>, BTreeMap<SystemId, SystemSeries>) {
    let mut metadata = Vec::with_capacity(count);
    let mut series = BTreeMap::new();
    for i in 0..count {
        let id = SystemId(i as u32 + 1);
        let starting_power = 0.85 + 0.05 * (i % 3) as f64;
        let annual_rate = -0.005 - 0.005 * (i % 4) as f64;
        series.insert(
            id,
            generate_degrading_series(days, starting_power, annual_rate, 0.02, 11),
        );
        metadata.push(generate_metadata(id, days as u32));
    }
    (metadata, series)
}
