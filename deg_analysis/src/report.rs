//! Aggregation and reporting
//!
//! Turns the method → system → rate mapping of a cohort analysis into
//! the summaries the presentation layer charts: per-method distribution
//! statistics and histograms, per-system comparison rows, and rate
//! distributions sliced by metadata groups (categorical, or a continuous
//! attribute cut into equal-width bins).

use crate::error::Result;
use crate::methods::Method;
use crate::pipeline::CohortAnalysis;
use pv_data::{SystemId, SystemMetadata};
use pv_math::stats::{bin_indices, histogram, median, Histogram};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Equal-width bin count for continuous metadata slicing.
pub const DEFAULT_BINS: usize = 10;

/// Distribution statistics of one method's rates across a cohort.
#[derive(Debug, Clone, Serialize)]
pub struct RateSummary {
    pub method: Method,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

impl RateSummary {
    /// Summarize one method's rates. `None` when the method produced no
    /// rates at all.
    pub fn from_rates(method: Method, rates: &BTreeMap<SystemId, f64>) -> Option<Self> {
        if rates.is_empty() {
            return None;
        }
        let values: Vec<f64> = rates.values().copied().collect();
        let count = values.len();
        let mean = values.iter().mean();
        let std_dev = if count > 1 { values.iter().std_dev() } else { 0.0 };
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        // non-empty by the guard above
        let median = median(&values).ok()?;

        Some(Self {
            method,
            count,
            mean,
            std_dev,
            min,
            median,
            max,
        })
    }
}

impl std::fmt::Display for RateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({} systems):", self.method, self.count)?;
        writeln!(f, "  mean:   {:+.5} Wh/W/year", self.mean)?;
        writeln!(f, "  median: {:+.5} Wh/W/year", self.median)?;
        writeln!(f, "  std:    {:.5}", self.std_dev)?;
        writeln!(f, "  range:  [{:+.5}, {:+.5}]", self.min, self.max)?;
        Ok(())
    }
}

/// One system's rates across every method that produced one for it.
#[derive(Debug, Clone, Serialize)]
pub struct SystemRateRow {
    pub system: SystemId,
    pub rates: BTreeMap<Method, f64>,
}

/// One group of a sliced comparison: its label and member rates.
#[derive(Debug, Clone, Serialize)]
pub struct RateGroup {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    pub rates: Vec<f64>,
}

/// One method's rates sliced by a metadata attribute.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedRates {
    pub method: Method,
    pub attribute: String,
    pub groups: Vec<RateGroup>,
}

impl GroupedRates {
    /// Slice one method's rates by a categorical attribute such as state.
    ///
    /// Systems without a metadata row are left out. Groups come back in
    /// label order.
    pub fn by_category<F>(
        method: Method,
        rates: &BTreeMap<SystemId, f64>,
        metadata: &[SystemMetadata],
        attribute: &str,
        key: F,
    ) -> Self
    where
        F: Fn(&SystemMetadata) -> String,
    {
        let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for meta in metadata {
            if let Some(&rate) = rates.get(&meta.id) {
                grouped.entry(key(meta)).or_default().push(rate);
            }
        }

        let groups = grouped
            .into_iter()
            .map(|(label, rates)| RateGroup {
                label,
                count: rates.len(),
                mean: rates.iter().mean(),
                rates,
            })
            .collect();

        Self {
            method,
            attribute: attribute.to_string(),
            groups,
        }
    }

    /// Slice one method's rates by a continuous attribute cut into
    /// `bins` equal-width bins; empty bins are omitted.
    pub fn by_bins<F>(
        method: Method,
        rates: &BTreeMap<SystemId, f64>,
        metadata: &[SystemMetadata],
        attribute: &str,
        bins: usize,
        value: F,
    ) -> Result<Self>
    where
        F: Fn(&SystemMetadata) -> f64,
    {
        let mut attr_values = Vec::new();
        let mut member_rates = Vec::new();
        for meta in metadata {
            if let Some(&rate) = rates.get(&meta.id) {
                attr_values.push(value(meta));
                member_rates.push(rate);
            }
        }

        if attr_values.is_empty() {
            return Ok(Self {
                method,
                attribute: attribute.to_string(),
                groups: Vec::new(),
            });
        }

        let indices = bin_indices(&attr_values, bins)?;
        let edge_hist = histogram(&attr_values, bins)?;

        let mut binned: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
        for (&bin, &rate) in indices.iter().zip(member_rates.iter()) {
            binned.entry(bin).or_default().push(rate);
        }

        let groups = binned
            .into_iter()
            .map(|(bin, rates)| {
                let (lo, hi) = edge_hist.bin_range(bin);
                RateGroup {
                    label: format!("{:.1}..{:.1}", lo, hi),
                    count: rates.len(),
                    mean: rates.iter().mean(),
                    rates,
                }
            })
            .collect();

        Ok(Self {
            method,
            attribute: attribute.to_string(),
            groups,
        })
    }
}

/// Everything the aggregate charts need for one cohort request.
#[derive(Debug, Clone, Serialize)]
pub struct CohortReport {
    pub summaries: Vec<RateSummary>,
    pub per_system: Vec<SystemRateRow>,
    pub histograms: BTreeMap<Method, Histogram>,
    pub by_state: Vec<GroupedRates>,
    pub by_size: Vec<GroupedRates>,
}

impl CohortReport {
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Serialize for the presentation layer.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the cohort report from an analysis and the metadata table.
pub fn build_report(analysis: &CohortAnalysis, metadata: &[SystemMetadata]) -> Result<CohortReport> {
    let mut summaries = Vec::new();
    let mut histograms = BTreeMap::new();
    let mut by_state = Vec::new();
    let mut by_size = Vec::new();

    for (&method, rates) in &analysis.rates {
        if let Some(summary) = RateSummary::from_rates(method, rates) {
            summaries.push(summary);
        }
        if !rates.is_empty() {
            let values: Vec<f64> = rates.values().copied().collect();
            histograms.insert(method, histogram(&values, DEFAULT_BINS)?);
        }
        by_state.push(GroupedRates::by_category(
            method,
            rates,
            metadata,
            "state",
            |m| m.state.clone(),
        ));
        by_size.push(GroupedRates::by_bins(
            method,
            rates,
            metadata,
            "system_size_w",
            DEFAULT_BINS,
            |m| m.system_size_w,
        )?);
    }

    let mut per_system: BTreeMap<SystemId, BTreeMap<Method, f64>> = BTreeMap::new();
    for (&method, rates) in &analysis.rates {
        for (&id, &rate) in rates {
            per_system.entry(id).or_default().insert(method, rate);
        }
    }
    let per_system = per_system
        .into_iter()
        .map(|(system, rates)| SystemRateRow { system, rates })
        .collect();

    Ok(CohortReport {
        summaries,
        per_system,
        histograms,
        by_state,
        by_size,
    })
}
