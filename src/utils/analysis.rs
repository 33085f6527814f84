//! Month-over-month growth analysis and series smoothing.

use crate::error::{ForecastError, Result};
use crate::utils::stats::{mean, median};

/// Period-over-period growth breakdown for a metric series.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthAnalysis {
    /// Absolute deltas between consecutive periods (length n-1).
    pub absolute: Vec<f64>,
    /// Percentage deltas between consecutive periods (length n-1).
    /// A zero predecessor yields a 0.0 entry.
    pub percentage: Vec<f64>,
    /// Mean of the percentage deltas.
    pub mean_pct: f64,
    /// Total growth from first to last value, in percent.
    pub total_pct: f64,
    pub first: f64,
    pub last: f64,
}

/// Compute growth statistics over a value series. Needs at least two points.
pub fn growth_analysis(values: &[f64]) -> Result<GrowthAnalysis> {
    if values.len() < 2 {
        return Err(ForecastError::InsufficientData {
            needed: 2,
            got: values.len(),
        });
    }

    let absolute: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let percentage: Vec<f64> = values
        .windows(2)
        .map(|w| if w[0] == 0.0 { 0.0 } else { (w[1] - w[0]) / w[0] * 100.0 })
        .collect();

    let first = values[0];
    let last = values[values.len() - 1];
    let total_pct = if first == 0.0 {
        0.0
    } else {
        (last - first) / first * 100.0
    };

    Ok(GrowthAnalysis {
        mean_pct: mean(&percentage),
        absolute,
        percentage,
        total_pct,
        first,
        last,
    })
}

/// Smoothing method for [`smooth_series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingMethod {
    Mean,
    Median,
}

/// Centered moving-window smoothing, window truncated at the edges.
pub fn smooth_series(values: &[f64], window: usize, method: SmoothingMethod) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(ForecastError::InvalidParameter(
            "window must be positive".to_string(),
        ));
    }

    let n = values.len();
    let half = window / 2;
    let mut smoothed = Vec::with_capacity(n);

    for i in 0..n {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(n);
        let slice = &values[start..end];
        smoothed.push(match method {
            SmoothingMethod::Mean => mean(slice),
            SmoothingMethod::Median => median(slice),
        });
    }

    Ok(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn growth_over_a_linear_series() {
        let values = [100.0, 110.0, 121.0];
        let growth = growth_analysis(&values).unwrap();

        assert_eq!(growth.absolute, vec![10.0, 11.0]);
        assert_relative_eq!(growth.percentage[0], 10.0, epsilon = 1e-10);
        assert_relative_eq!(growth.percentage[1], 10.0, epsilon = 1e-10);
        assert_relative_eq!(growth.mean_pct, 10.0, epsilon = 1e-10);
        assert_relative_eq!(growth.total_pct, 21.0, epsilon = 1e-10);
        assert_eq!(growth.first, 100.0);
        assert_eq!(growth.last, 121.0);
    }

    #[test]
    fn growth_over_a_zero_base_does_not_blow_up() {
        let values = [0.0, 50.0, 100.0];
        let growth = growth_analysis(&values).unwrap();

        assert_eq!(growth.percentage[0], 0.0);
        assert_relative_eq!(growth.percentage[1], 100.0, epsilon = 1e-10);
        assert_eq!(growth.total_pct, 0.0);
    }

    #[test]
    fn growth_needs_two_points() {
        assert!(matches!(
            growth_analysis(&[5.0]),
            Err(ForecastError::InsufficientData { needed: 2, got: 1 })
        ));
    }

    #[test]
    fn smoothing_mean_window_three() {
        let values = [1.0, 2.0, 9.0, 2.0, 1.0];
        let smoothed = smooth_series(&values, 3, SmoothingMethod::Mean).unwrap();

        // Edges use truncated windows.
        assert_relative_eq!(smoothed[0], 1.5, epsilon = 1e-10);
        assert_relative_eq!(smoothed[1], 4.0, epsilon = 1e-10);
        assert_relative_eq!(smoothed[2], 13.0 / 3.0, epsilon = 1e-10);
        assert_relative_eq!(smoothed[4], 1.5, epsilon = 1e-10);
    }

    #[test]
    fn smoothing_median_resists_spikes() {
        let values = [1.0, 1.0, 100.0, 1.0, 1.0];
        let smoothed = smooth_series(&values, 3, SmoothingMethod::Median).unwrap();
        assert_eq!(smoothed[2], 1.0);
    }

    #[test]
    fn smoothing_rejects_zero_window() {
        assert!(smooth_series(&[1.0], 0, SmoothingMethod::Mean).is_err());
    }

    #[test]
    fn smoothing_empty_series_is_empty() {
        let smoothed = smooth_series(&[], 3, SmoothingMethod::Mean).unwrap();
        assert!(smoothed.is_empty());
    }
}
