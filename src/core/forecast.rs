//! Scenario forecast result type.

use crate::utils::metrics::QualityMetrics;
use crate::utils::trend_test::TrendTest;

/// Forecast scenarios for one metric: the base linear-trend extrapolation
/// plus optimistic and conservative bands, with the fit's quality record
/// attached.
///
/// Ephemeral output: built per render request, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioForecast {
    /// Base extrapolation, one value per future period.
    pub point: Vec<f64>,
    /// Point forecast plus 1.96 × residual std.
    pub optimistic: Vec<f64>,
    /// Point forecast minus 1.96 × residual std, floored at zero.
    pub conservative: Vec<f64>,
    /// In-sample fit quality.
    pub quality: QualityMetrics,
    /// Rank-correlation trend test over the fitting history.
    pub trend: TrendTest,
    /// Population standard deviation of the fit residuals.
    pub residual_std: f64,
    /// Fitted slope per period.
    pub slope: f64,
    /// Fitted intercept.
    pub intercept: f64,
}

impl ScenarioForecast {
    /// Number of forecasted periods.
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// (conservative, point, optimistic) for one future period.
    pub fn band_at(&self, index: usize) -> Option<(f64, f64, f64)> {
        Some((
            *self.conservative.get(index)?,
            *self.point.get(index)?,
            *self.optimistic.get(index)?,
        ))
    }

    /// Map every band through a value transform, preserving structure.
    ///
    /// The transform receives the period index and the current value;
    /// the business-event adjusters are built on this.
    pub fn map_bands<F>(&self, mut transform: F) -> ScenarioForecast
    where
        F: FnMut(usize, f64) -> f64,
    {
        ScenarioForecast {
            point: self
                .point
                .iter()
                .enumerate()
                .map(|(i, v)| transform(i, *v))
                .collect(),
            optimistic: self
                .optimistic
                .iter()
                .enumerate()
                .map(|(i, v)| transform(i, *v))
                .collect(),
            conservative: self
                .conservative
                .iter()
                .enumerate()
                .map(|(i, v)| transform(i, *v))
                .collect(),
            ..self.clone()
        }
    }
}
