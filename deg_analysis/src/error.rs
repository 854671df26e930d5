//! Error types for the deg_analysis crate

use thiserror::Error;

/// Custom error types for the analysis engine
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A (system, method) pair has too little data to produce a rate
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A malformed request parameter, rejected before any computation
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Error from a numerical routine
    #[error("Math error: {0}")]
    Math(#[from] pv_math::MathError),

    /// Error from the data layer or store
    #[error("Data error: {0}")]
    Data(#[from] pv_data::DataError),

    /// Error serializing a report for the presentation layer
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, AnalysisError>;
