//! Error types for the metricscast library.

use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while preparing data or fitting forecasts.
///
/// Everything here is recoverable at the per-metric boundary: the batch
/// API in [`crate::scenario`] catches these, logs them, and reports the
/// affected metric as unavailable without touching the other metrics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient usable data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Dimension mismatch between parallel sequences.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// The regression is degenerate (no variance along the fitted axis).
    #[error("degenerate fit: {0}")]
    DegenerateFit(String),

    /// Numerical computation failure (non-finite input, overflow, ...).
    #[error("computation error: {0}")]
    Computation(String),
}
