//! Forecaster trait defining the model interface.

use crate::core::MetricSeries;
use crate::error::Result;

/// Common interface for trend models over a labeled metric series.
///
/// Object-safe; the scenario layer only depends on this seam, so a richer
/// model can replace the linear trend without touching the orchestration.
pub trait Forecaster {
    /// Fit the model to the (already filtered) history.
    fn fit(&mut self, series: &MetricSeries) -> Result<()>;

    /// Point predictions for the next `horizon` positions.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>>;

    /// In-sample fitted values.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Residuals (actual - fitted).
    fn residuals(&self) -> Option<&[f64]>;

    /// Model name for logs and labels.
    fn name(&self) -> &str;

    /// Whether the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed forecaster trait objects.
pub type BoxedForecaster = Box<dyn Forecaster>;
