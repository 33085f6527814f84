//! Single-feature linear trend model.
//!
//! Ordinary least squares of the metric value against the observation's
//! position in the (filtered) sequence. Position, not calendar distance:
//! months dropped by the zero filter do not stretch the index axis, so
//! irregular gaps are not reflected in the slope.

use crate::core::MetricSeries;
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::stats::std_population;

/// Linear trend fitted over positional indices 0, 1, 2, ...
#[derive(Debug, Clone, Default)]
pub struct LinearTrend {
    slope: Option<f64>,
    intercept: Option<f64>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    n_obs: usize,
}

impl LinearTrend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted slope per period.
    pub fn slope(&self) -> Result<f64> {
        self.slope.ok_or(ForecastError::FitRequired)
    }

    /// Fitted intercept (value at position 0).
    pub fn intercept(&self) -> Result<f64> {
        self.intercept.ok_or(ForecastError::FitRequired)
    }

    /// Population standard deviation of the in-sample residuals.
    pub fn residual_std(&self) -> Result<f64> {
        self.residuals
            .as_deref()
            .map(std_population)
            .ok_or(ForecastError::FitRequired)
    }
}

impl Forecaster for LinearTrend {
    fn fit(&mut self, series: &MetricSeries) -> Result<()> {
        let values = series.values();
        if values.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: values.len(),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::Computation(
                "non-finite value in history".to_string(),
            ));
        }

        let n = values.len() as f64;
        let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();
        let sum_x2: f64 = (0..values.len()).map(|i| (i * i) as f64).sum();

        let mean_x = sum_x / n;
        let mean_y = sum_y / n;

        let ss_xx = sum_x2 - n * mean_x * mean_x;
        let ss_xy = sum_xy - n * mean_x * mean_y;

        // ss_xx is positive for any two distinct indices; a collapse here
        // means the arithmetic itself broke down.
        if !ss_xx.is_finite() || ss_xx.abs() < 1e-10 {
            return Err(ForecastError::DegenerateFit(
                "no variance along the index axis".to_string(),
            ));
        }

        let slope = ss_xy / ss_xx;
        let intercept = mean_y - slope * mean_x;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(ForecastError::Computation(
                "non-finite regression coefficients".to_string(),
            ));
        }

        let fitted: Vec<f64> = (0..values.len())
            .map(|i| slope * i as f64 + intercept)
            .collect();
        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .map(|(y, f)| y - f)
            .collect();

        self.slope = Some(slope);
        self.intercept = Some(intercept);
        self.fitted = Some(fitted);
        self.residuals = Some(residuals);
        self.n_obs = values.len();

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let slope = self.slope.ok_or(ForecastError::FitRequired)?;
        let intercept = self.intercept.ok_or(ForecastError::FitRequired)?;

        // Continue the same integer index sequence past the history.
        Ok((self.n_obs..self.n_obs + horizon)
            .map(|i| slope * i as f64 + intercept)
            .collect())
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "LinearTrend"
    }
}
