//! # Solar Insight
//!
//! A workspace for exploring photovoltaic system performance: daily
//! normalized-power series flow from a store adapter through a validity
//! mask into a set of degradation estimation methods, and the resulting
//! annualized rates are aggregated into cohort-level comparisons.
//!
//! The member crates split the work:
//!
//! - [`pv_math`]: regression, smoothing, decomposition, and binning
//!   routines over plain vectors
//! - [`pv_data`]: the series/metadata domain model, masking, and store
//!   adapters with a bounded cache
//! - [`deg_analysis`]: per-method rate estimation, the cohort pipeline,
//!   and reporting
//!
//! ## Example
//!
//! ```
//! use solar_insight::deg_analysis::methods::Method;
//! use solar_insight::deg_analysis::pipeline::{analyze_cohort, AnalysisRequest};
//! use solar_insight::pv_data::store::{CachingStore, MemoryStore};
//! use solar_insight::pv_data::utils::generate_degrading_series;
//! use solar_insight::pv_data::{SystemId, ValidBounds};
//!
//! let mut inner = MemoryStore::new();
//! inner.add_series(SystemId(1), generate_degrading_series(730, 0.95, -0.02, 0.01, 7));
//! let mut store = CachingStore::new(inner, 16);
//!
//! let request = AnalysisRequest {
//!     system_ids: vec![SystemId(1)],
//!     bounds: ValidBounds::new(200.0, 1400.0, 0.0, 2.0).unwrap(),
//!     methods: vec![Method::Ols, Method::Yoy],
//! };
//! let analysis = analyze_cohort(&mut store, &request).unwrap();
//! assert!(analysis.rates_for(Method::Ols).is_some());
//! ```

pub use deg_analysis;
pub use pv_data;
pub use pv_math;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
