//! Outlier detection for metric series.

use crate::utils::stats::{mean, percentile, std_population};

/// Method for outlier detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlierMethod {
    /// Interquartile range fences.
    Iqr,
    /// Standard-score threshold.
    ZScore,
}

/// Configuration for outlier detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlierConfig {
    pub method: OutlierMethod,
    /// IQR fence multiplier, or z-score cutoff, depending on the method.
    pub threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            method: OutlierMethod::Iqr,
            threshold: 1.5,
        }
    }
}

impl OutlierConfig {
    /// IQR fences at `multiplier` × IQR beyond the quartiles.
    pub fn iqr(multiplier: f64) -> Self {
        Self {
            method: OutlierMethod::Iqr,
            threshold: multiplier,
        }
    }

    /// Z-score cutoff (3.0 is the usual choice).
    pub fn z_score(threshold: f64) -> Self {
        Self {
            method: OutlierMethod::ZScore,
            threshold,
        }
    }
}

/// Indices and values of detected outliers, in series order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlierReport {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl OutlierReport {
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_outlier(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}

/// Detect outliers in a value series.
pub fn detect_outliers(values: &[f64], config: &OutlierConfig) -> OutlierReport {
    if values.is_empty() {
        return OutlierReport::default();
    }

    let flagged: Vec<bool> = match config.method {
        OutlierMethod::Iqr => {
            let q1 = percentile(values, 25.0);
            let q3 = percentile(values, 75.0);
            let iqr = q3 - q1;
            let lower = q1 - config.threshold * iqr;
            let upper = q3 + config.threshold * iqr;
            values.iter().map(|v| *v < lower || *v > upper).collect()
        }
        OutlierMethod::ZScore => {
            let m = mean(values);
            let sd = std_population(values);
            if sd == 0.0 {
                vec![false; values.len()]
            } else {
                values
                    .iter()
                    .map(|v| ((v - m) / sd).abs() > config.threshold)
                    .collect()
            }
        }
    };

    let mut report = OutlierReport::default();
    for (i, (value, is_outlier)) in values.iter().zip(flagged).enumerate() {
        if is_outlier {
            report.indices.push(i);
            report.values.push(*value);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iqr_flags_an_extreme_spike() {
        let values = vec![100.0, 105.0, 98.0, 102.0, 101.0, 500.0, 99.0];
        let report = detect_outliers(&values, &OutlierConfig::default());

        assert_eq!(report.count(), 1);
        assert_eq!(report.indices, vec![5]);
        assert_eq!(report.values, vec![500.0]);
        assert!(report.is_outlier(5));
        assert!(!report.is_outlier(0));
    }

    #[test]
    fn iqr_clean_series_has_no_outliers() {
        let values: Vec<f64> = (0..12).map(|i| 100.0 + i as f64).collect();
        let report = detect_outliers(&values, &OutlierConfig::default());
        assert_eq!(report.count(), 0);
    }

    #[test]
    fn z_score_flags_far_points() {
        let mut values = vec![10.0; 20];
        values[7] = 10.5;
        values[12] = 300.0;

        let report = detect_outliers(&values, &OutlierConfig::z_score(3.0));
        assert_eq!(report.indices, vec![12]);
    }

    #[test]
    fn z_score_constant_series_has_no_outliers() {
        let values = vec![5.0; 8];
        let report = detect_outliers(&values, &OutlierConfig::z_score(3.0));
        assert_eq!(report.count(), 0);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = detect_outliers(&[], &OutlierConfig::default());
        assert_eq!(report, OutlierReport::default());
    }

    #[test]
    fn wider_fences_flag_fewer_points() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 20.0];
        let tight = detect_outliers(&values, &OutlierConfig::iqr(1.5));
        let loose = detect_outliers(&values, &OutlierConfig::iqr(10.0));
        assert!(tight.count() >= loose.count());
    }
}
