//! Forecast quality metrics.

use crate::error::{ForecastError, Result};

/// In-sample fit quality for one metric's forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityMetrics {
    /// Coefficient of determination, `1 - SS_res / SS_tot`.
    /// Negative when the fit is worse than predicting the mean.
    pub r_squared: f64,
    /// Root Mean Squared Error.
    pub rmse: f64,
    /// Mean Absolute Error.
    pub mae: f64,
    /// Mean Absolute Percentage Error over the nonzero actuals, as a
    /// percentage. 0.0 when every actual is zero.
    pub mape: f64,
}

impl QualityMetrics {
    /// All-zero record, the fallback when a numerical issue makes the
    /// real metrics meaningless.
    pub fn zero() -> Self {
        Self {
            r_squared: 0.0,
            rmse: 0.0,
            mae: 0.0,
            mape: 0.0,
        }
    }
}

/// Calculate quality metrics between actual and fitted values.
///
/// Callers must pass equal-length, non-empty slices; violations surface
/// as typed errors. Numerical issues inside the computation (non-finite
/// sums) degrade to [`QualityMetrics::zero`] instead of propagating.
pub fn calculate_metrics(actual: &[f64], fitted: &[f64]) -> Result<QualityMetrics> {
    if actual.is_empty() || fitted.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    if actual.len() != fitted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: fitted.len(),
        });
    }

    let n = actual.len() as f64;

    let mae: f64 = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, f)| (a - f).abs())
        .sum::<f64>()
        / n;

    let mse: f64 = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, f)| (a - f).powi(2))
        .sum::<f64>()
        / n;
    let rmse = mse.sqrt();

    // MAPE over the nonzero actuals only; all-zero actuals report 0
    // rather than an undefined ratio.
    let nonzero: Vec<(f64, f64)> = actual
        .iter()
        .zip(fitted.iter())
        .filter(|(a, _)| **a != 0.0)
        .map(|(a, f)| (*a, *f))
        .collect();
    let mape = if nonzero.is_empty() {
        0.0
    } else {
        100.0
            * nonzero
                .iter()
                .map(|(a, f)| ((a - f) / a).abs())
                .sum::<f64>()
            / nonzero.len() as f64
    };

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(fitted.iter())
        .map(|(a, f)| (a - f).powi(2))
        .sum();
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    let metrics = QualityMetrics {
        r_squared,
        rmse,
        mae,
        mape,
    };

    if [metrics.r_squared, metrics.rmse, metrics.mae, metrics.mape]
        .iter()
        .any(|v| !v.is_finite())
    {
        return Ok(QualityMetrics::zero());
    }

    Ok(metrics)
}
