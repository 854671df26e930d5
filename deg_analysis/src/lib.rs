//! # Degradation Analysis
//!
//! The analysis engine of the workspace: given a cohort of photovoltaic
//! systems, user-supplied validity bounds, and a set of estimation
//! methods, it computes one annualized degradation rate per (system,
//! method) pair, keeps the transformed series for the time plots, and
//! aggregates the rates into distribution summaries and metadata-group
//! comparisons.
//!
//! ## Usage Example
//!
//! ```
//! use deg_analysis::methods::Method;
//! use deg_analysis::pipeline::{analyze_cohort, AnalysisRequest};
//! use pv_data::store::{CachingStore, MemoryStore};
//! use pv_data::utils::generate_degrading_series;
//! use pv_data::{SystemId, ValidBounds};
//!
//! let mut inner = MemoryStore::new();
//! inner.add_series(SystemId(1), generate_degrading_series(730, 0.95, -0.02, 0.01, 0));
//! let mut store = CachingStore::new(inner, 16);
//!
//! let request = AnalysisRequest {
//!     system_ids: vec![SystemId(1)],
//!     bounds: ValidBounds::new(0.0, 2000.0, 0.0, 2.0).unwrap(),
//!     methods: vec![Method::Ols],
//! };
//! let analysis = analyze_cohort(&mut store, &request).unwrap();
//! assert_eq!(analysis.rates[&Method::Ols].len(), 1);
//! ```

pub mod error;
pub mod methods;
pub mod pipeline;
pub mod report;

// Re-export commonly used types
pub use crate::error::{AnalysisError, Result};
pub use crate::methods::{Method, MethodOutput};
pub use crate::pipeline::{analyze_cohort, analyze_system, AnalysisRequest, CohortAnalysis};
pub use crate::report::{build_report, CohortReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
