//! Cohort analysis pipeline
//!
//! Fetches the selected systems through the caching store, masks each
//! series, runs the selected methods, and collects annualized rates. A
//! (system, method) pair that fails for lack of data is logged and
//! skipped; the cohort analysis as a whole still succeeds.

use crate::error::Result;
use crate::methods::{self, Method, MethodOutput};
use log::warn;
use pv_data::store::{CachingStore, SeriesStore};
use pv_data::{Mask, SystemId, SystemSeries, ValidBounds};
use serde::Serialize;
use std::collections::BTreeMap;

/// One analysis request: which systems, which bounds, which methods.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub system_ids: Vec<SystemId>,
    pub bounds: ValidBounds,
    pub methods: Vec<Method>,
}

/// Everything computed for one system, keyed by method so a method
/// requested twice is computed once.
#[derive(Debug, Clone, Serialize)]
pub struct SystemAnalysis {
    pub outputs: BTreeMap<Method, MethodOutput>,
}

/// The per-system outputs and the method → system → rate mapping for one
/// cohort request.
#[derive(Debug, Clone, Serialize)]
pub struct CohortAnalysis {
    pub systems: BTreeMap<SystemId, SystemAnalysis>,
    pub rates: BTreeMap<Method, BTreeMap<SystemId, f64>>,
}

impl CohortAnalysis {
    /// The result of a request that admitted nothing, e.g. rejected
    /// bounds surfaced as a no-op instead of an error page.
    pub fn empty() -> Self {
        Self {
            systems: BTreeMap::new(),
            rates: BTreeMap::new(),
        }
    }

    pub fn rates_for(&self, method: Method) -> Option<&BTreeMap<SystemId, f64>> {
        self.rates.get(&method)
    }
}

/// Run the requested methods over one masked series.
///
/// Pairs that fail are logged with the system identifier and omitted from
/// the outputs; nothing propagates.
pub fn analyze_system(
    id: SystemId,
    series: &SystemSeries,
    mask: &Mask,
    method_list: &[Method],
) -> SystemAnalysis {
    let mut outputs = BTreeMap::new();
    for &method in method_list {
        // a repeated method in the request is a no-op
        if outputs.contains_key(&method) {
            continue;
        }
        match methods::run(method, series, mask) {
            Ok(output) => {
                outputs.insert(method, output);
            }
            Err(err) => {
                warn!("skipping method {} for system {}: {}", method, id, err);
            }
        }
    }
    SystemAnalysis { outputs }
}

/// Analyze a cohort of systems.
///
/// Store fetch failures propagate; systems the store does not know are
/// absent from the result, and per-pair method failures are skipped.
pub fn analyze_cohort<S: SeriesStore>(
    store: &mut CachingStore<S>,
    request: &AnalysisRequest,
) -> Result<CohortAnalysis> {
    let series_by_id = store.get_series(&request.system_ids)?;

    let mut systems = BTreeMap::new();
    let mut rates: BTreeMap<Method, BTreeMap<SystemId, f64>> = BTreeMap::new();
    for (id, series) in &series_by_id {
        let mask = request.bounds.mask(series);
        let analysis = analyze_system(*id, series, &mask, &request.methods);
        for (&method, output) in &analysis.outputs {
            rates.entry(method).or_default().insert(*id, output.rate());
        }
        systems.insert(*id, analysis);
    }

    Ok(CohortAnalysis { systems, rates })
}
