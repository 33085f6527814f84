//! Per-metric scenario forecasting.
//!
//! Orchestrates one metric's pipeline: gate history to apportioned
//! months, drop placeholder zeros, fit the linear trend, extrapolate,
//! derive the confidence bands, and attach quality metrics and the trend
//! test. Failures are caught here, per metric: one metric with too little
//! history never takes down the others.

use crate::core::{ApportionedMonths, Metric, MetricSeries, MetricsTable, ScenarioForecast};
use crate::error::{ForecastError, Result};
use crate::models::{Forecaster, LinearTrend};
use crate::utils::metrics::calculate_metrics;
use crate::utils::trend_test::kendall_trend;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

/// Minimum nonzero history points for a meaningful linear fit.
pub const MIN_FIT_POINTS: usize = 3;

/// Z-score for the 95% scenario bands.
pub const CONFIDENCE_Z: f64 = 1.96;

/// Scenario forecaster for monthly dashboard metrics.
#[derive(Debug, Clone, Default)]
pub struct ScenarioForecaster {
    apportioned: Option<ApportionedMonths>,
}

impl ScenarioForecaster {
    /// Forecaster that uses every nonzero row as history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forecaster that additionally gates history to apportioned months.
    pub fn with_apportioned(apportioned: ApportionedMonths) -> Self {
        Self {
            apportioned: Some(apportioned),
        }
    }

    /// Fallible forecast for one metric series.
    ///
    /// Exposes the error taxonomy (insufficient data, degenerate fit,
    /// computation failure) so callers and tests can tell the cases
    /// apart. Most callers want [`forecast`](Self::forecast) instead.
    pub fn try_forecast(&self, series: &MetricSeries, horizon: usize) -> Result<ScenarioForecast> {
        let history = match &self.apportioned {
            Some(months) => series.retain_apportioned(months),
            None => series.clone(),
        };
        let active = history.nonzero();

        if active.len() < MIN_FIT_POINTS {
            return Err(ForecastError::InsufficientData {
                needed: MIN_FIT_POINTS,
                got: active.len(),
            });
        }

        let mut model = LinearTrend::new();
        model.fit(&active)?;

        let point = model.predict(horizon)?;
        let residual_std = model.residual_std()?;
        let margin = CONFIDENCE_Z * residual_std;

        let optimistic: Vec<f64> = point.iter().map(|v| v + margin).collect();
        // Counts and money cannot go negative, so the low scenario is
        // floored at zero.
        let conservative: Vec<f64> = point.iter().map(|v| (v - margin).max(0.0)).collect();

        let fitted = model.fitted_values().ok_or(ForecastError::FitRequired)?;
        let quality = calculate_metrics(active.values(), fitted)?;
        let trend = kendall_trend(active.values())?;

        Ok(ScenarioForecast {
            point,
            optimistic,
            conservative,
            quality,
            trend,
            residual_std,
            slope: model.slope()?,
            intercept: model.intercept()?,
        })
    }

    /// Forecast one metric series, recovering from failure locally.
    ///
    /// Errors are logged and collapse to `None`; the caller shows an
    /// "insufficient data" notice for that metric and moves on.
    pub fn forecast(&self, series: &MetricSeries, horizon: usize) -> Option<ScenarioForecast> {
        match self.try_forecast(series, horizon) {
            Ok(forecast) => Some(forecast),
            Err(err) => {
                log::warn!("forecast unavailable: {err}");
                None
            }
        }
    }

    /// Forecast one metric out of the table.
    pub fn forecast_metric(
        &self,
        table: &MetricsTable,
        metric: Metric,
        horizon: usize,
    ) -> Option<ScenarioForecast> {
        match self.try_forecast(&table.series(metric), horizon) {
            Ok(forecast) => {
                log::debug!(
                    "{}: fitted slope {:.4}, residual std {:.4}",
                    metric.label(),
                    forecast.slope,
                    forecast.residual_std
                );
                Some(forecast)
            }
            Err(err) => {
                log::warn!("{}: forecast unavailable: {err}", metric.label());
                None
            }
        }
    }

    /// Forecast a fixed list of metrics, in order, isolating failures.
    pub fn forecast_table(
        &self,
        table: &MetricsTable,
        metrics: &[Metric],
        horizon: usize,
    ) -> Vec<(Metric, Option<ScenarioForecast>)> {
        metrics
            .iter()
            .map(|&metric| (metric, self.forecast_metric(table, metric, horizon)))
            .collect()
    }

    /// Cached variant of [`forecast_metric`](Self::forecast_metric).
    ///
    /// Only successful forecasts are cached; an unavailable metric is
    /// re-evaluated on the next render, which is cheap.
    pub fn forecast_metric_cached(
        &self,
        cache: &mut ForecastCache,
        table: &MetricsTable,
        metric: Metric,
        horizon: usize,
    ) -> Option<ScenarioForecast> {
        let series = table.series(metric);
        if let Some(hit) = cache.fetch(metric, horizon, &series) {
            return Some(hit.clone());
        }
        let forecast = self.forecast(&series, horizon)?;
        cache.store(metric, horizon, &series, forecast.clone());
        Some(forecast)
    }
}

/// Memoized forecasts keyed by input identity, with a time-based expiry.
///
/// Exists purely to skip recomputation across dashboard re-renders; the
/// key covers the metric, horizon and the exact series content, so any
/// data edit is a cache miss.
#[derive(Debug)]
pub struct ForecastCache {
    ttl: Duration,
    entries: HashMap<u64, (Instant, ScenarioForecast)>,
}

impl ForecastCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    fn key(metric: Metric, horizon: usize, series: &MetricSeries) -> u64 {
        let mut hasher = DefaultHasher::new();
        metric.hash(&mut hasher);
        horizon.hash(&mut hasher);
        for (label, value) in series.iter() {
            label.hash(&mut hasher);
            value.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Fresh cached forecast for this exact input, if any.
    pub fn fetch(
        &self,
        metric: Metric,
        horizon: usize,
        series: &MetricSeries,
    ) -> Option<&ScenarioForecast> {
        let (stored_at, forecast) = self.entries.get(&Self::key(metric, horizon, series))?;
        if stored_at.elapsed() > self.ttl {
            return None;
        }
        Some(forecast)
    }

    pub fn store(
        &mut self,
        metric: Metric,
        horizon: usize,
        series: &MetricSeries,
        forecast: ScenarioForecast,
    ) {
        self.entries
            .insert(Self::key(metric, horizon, series), (Instant::now(), forecast));
    }

    /// Drop expired entries.
    pub fn purge_expired(&mut self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (stored_at, _)| stored_at.elapsed() <= ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(pairs: &[(&str, f64)]) -> MetricSeries {
        MetricSeries::from_pairs(pairs.iter().map(|(l, v)| (l.to_string(), *v)))
    }

    fn leads_table(values: &[f64]) -> MetricsTable {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let mut record = crate::core::MonthlyMetricRecord::new(format!("M{}", i + 1));
                record.leads = *v as u64;
                record
            })
            .collect()
    }

    #[test]
    fn perfect_linear_history_forecasts_exactly() {
        let forecaster = ScenarioForecaster::new();
        let history = series(&[
            ("M1", 100.0),
            ("M2", 110.0),
            ("M3", 120.0),
            ("M4", 130.0),
            ("M5", 140.0),
        ]);

        let forecast = forecaster.try_forecast(&history, 3).unwrap();

        assert_relative_eq!(forecast.slope, 10.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.intercept, 100.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.point[0], 150.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.point[1], 160.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.point[2], 170.0, epsilon = 1e-9);

        // Perfect fit: bands collapse onto the point forecast.
        assert_relative_eq!(forecast.residual_std, 0.0, epsilon = 1e-9);
        for i in 0..3 {
            assert_relative_eq!(forecast.optimistic[i], forecast.point[i], epsilon = 1e-9);
            assert_relative_eq!(forecast.conservative[i], forecast.point[i], epsilon = 1e-9);
        }
        assert_relative_eq!(forecast.quality.r_squared, 1.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.quality.mape, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_rows_are_reindexed_out_of_the_fit() {
        let forecaster = ScenarioForecaster::new();
        let gappy = series(&[
            ("M1", 100.0),
            ("M2", 0.0),
            ("M3", 120.0),
            ("M4", 0.0),
            ("M5", 140.0),
        ]);
        let dense = series(&[("M1", 100.0), ("M3", 120.0), ("M5", 140.0)]);

        let from_gappy = forecaster.try_forecast(&gappy, 2).unwrap();
        let from_dense = forecaster.try_forecast(&dense, 2).unwrap();

        // The zero rows must not influence the fit at all.
        assert_relative_eq!(from_gappy.slope, from_dense.slope, epsilon = 1e-9);
        assert_relative_eq!(from_gappy.intercept, from_dense.intercept, epsilon = 1e-9);
        assert_eq!(from_gappy.point, from_dense.point);
        // Slope is 20 per *filtered* position; forecasting continues
        // from position 3.
        assert_relative_eq!(from_gappy.point[0], 160.0, epsilon = 1e-9);
    }

    #[test]
    fn too_few_nonzero_points_is_unavailable() {
        let forecaster = ScenarioForecaster::new();
        let sparse = series(&[("M1", 100.0), ("M2", 0.0), ("M3", 120.0)]);

        let result = forecaster.try_forecast(&sparse, 3);
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientData { needed: 3, got: 2 })
        ));
        assert!(forecaster.forecast(&sparse, 3).is_none());
    }

    #[test]
    fn apportioned_gate_excludes_open_months() {
        let apportioned =
            ApportionedMonths::from_labels(["May/25", "Jun/25", "Jul/25", "Aug/25"]);
        let forecaster = ScenarioForecaster::with_apportioned(apportioned);

        // Sep/25 has data but is not closed yet; it must not shape the fit.
        let history = series(&[
            ("May/25", 100.0),
            ("Jun/25", 110.0),
            ("Jul/25", 120.0),
            ("Aug/25", 130.0),
            ("Sep/25", 999.0),
        ]);

        let forecast = forecaster.try_forecast(&history, 1).unwrap();
        assert_relative_eq!(forecast.slope, 10.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.point[0], 140.0, epsilon = 1e-9);
    }

    #[test]
    fn noisy_history_produces_ordered_bands() {
        let forecaster = ScenarioForecaster::new();
        let history = series(&[
            ("M1", 270.0),
            ("M2", 290.0),
            ("M3", 401.0),
            ("M4", 600.0),
            ("M5", 604.0),
        ]);

        let forecast = forecaster.try_forecast(&history, 3).unwrap();
        assert!(forecast.residual_std > 0.0);
        for i in 0..forecast.horizon() {
            let (lo, mid, hi) = forecast.band_at(i).unwrap();
            assert!(lo <= mid && mid <= hi);
            assert!(lo >= 0.0);
        }
    }

    #[test]
    fn conservative_band_is_floored_at_zero() {
        let forecaster = ScenarioForecaster::new();
        // Small values with violent swings: margin dwarfs the trend.
        let history = series(&[("M1", 40.0), ("M2", 1.0), ("M3", 38.0), ("M4", 2.0)]);

        let forecast = forecaster.try_forecast(&history, 3).unwrap();
        assert!(forecast.conservative.iter().all(|v| *v >= 0.0));
        assert!(forecast.conservative.iter().any(|v| *v == 0.0));
    }

    #[test]
    fn failed_metric_does_not_poison_the_batch() {
        let forecaster = ScenarioForecaster::new();
        let table = leads_table(&[100.0, 110.0, 120.0, 130.0]);

        let results = forecaster.forecast_table(
            &table,
            &[Metric::Leads, Metric::WebRevenue, Metric::Sessions],
            2,
        );

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, Metric::Leads);
        assert!(results[0].1.is_some());
        // Revenue and sessions are all zero in this table.
        assert!(results[1].1.is_none());
        assert!(results[2].1.is_none());
    }

    #[test]
    fn batch_preserves_requested_order() {
        let forecaster = ScenarioForecaster::new();
        let table = leads_table(&[100.0, 110.0, 120.0]);

        let metrics = [Metric::WebRevenue, Metric::Leads];
        let results = forecaster.forecast_table(&table, &metrics, 1);
        let order: Vec<Metric> = results.iter().map(|(m, _)| *m).collect();
        assert_eq!(order, metrics);
    }

    #[test]
    fn cache_hits_on_identical_input() {
        let forecaster = ScenarioForecaster::new();
        let table = leads_table(&[100.0, 110.0, 120.0, 130.0]);
        let mut cache = ForecastCache::new(Duration::from_secs(300));

        let first = forecaster
            .forecast_metric_cached(&mut cache, &table, Metric::Leads, 3)
            .unwrap();
        assert_eq!(cache.len(), 1);

        let second = forecaster
            .forecast_metric_cached(&mut cache, &table, Metric::Leads, 3)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_misses_when_data_changes() {
        let forecaster = ScenarioForecaster::new();
        let mut cache = ForecastCache::new(Duration::from_secs(300));

        let table = leads_table(&[100.0, 110.0, 120.0, 130.0]);
        forecaster.forecast_metric_cached(&mut cache, &table, Metric::Leads, 3);

        let edited = leads_table(&[100.0, 110.0, 120.0, 131.0]);
        forecaster.forecast_metric_cached(&mut cache, &edited, Metric::Leads, 3);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn cache_expires_entries() {
        let forecaster = ScenarioForecaster::new();
        let table = leads_table(&[100.0, 110.0, 120.0, 130.0]);
        let mut cache = ForecastCache::new(Duration::from_millis(1));

        forecaster.forecast_metric_cached(&mut cache, &table, Metric::Leads, 3);
        std::thread::sleep(Duration::from_millis(5));
        let series = table.series(Metric::Leads);
        assert!(cache.fetch(Metric::Leads, 3, &series).is_none());

        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn horizon_zero_yields_empty_bands_with_quality() {
        let forecaster = ScenarioForecaster::new();
        let history = series(&[("M1", 10.0), ("M2", 20.0), ("M3", 30.0)]);

        let forecast = forecaster.try_forecast(&history, 0).unwrap();
        assert_eq!(forecast.horizon(), 0);
        assert_relative_eq!(forecast.quality.r_squared, 1.0, epsilon = 1e-9);
    }
}
