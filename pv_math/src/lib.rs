//! # PV Math
//!
//! Numerical building blocks for photovoltaic performance analysis.
//! This crate provides the regression, smoothing, and decomposition
//! routines the degradation engine runs on plain `f64` vectors; it has
//! no notion of dates, systems, or storage.

use thiserror::Error;

// Transform modules
pub mod decomposition;
pub mod fill;
pub mod regression;
pub mod smoothing;
pub mod stats;

/// Errors that can occur in numerical calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for numerical operations
pub type Result<T> = std::result::Result<T, MathError>;
