//! Labeled univariate series extracted from the metrics table.

use crate::core::apportion::ApportionedMonths;
use crate::error::{ForecastError, Result};

/// An ordered sequence of (month label, value) observations for one metric.
///
/// Order is the table's chronological order. Labels are opaque ordinal
/// tokens; the series never does calendar arithmetic on them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSeries {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl MetricSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from parallel label/value vectors.
    pub fn from_parts(labels: Vec<String>, values: Vec<f64>) -> Result<Self> {
        if labels.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: labels.len(),
                got: values.len(),
            });
        }
        Ok(Self { labels, values })
    }

    /// Build from (label, value) pairs.
    pub fn from_pairs<L, I>(pairs: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, f64)>,
    {
        let mut series = Self::new();
        for (label, value) in pairs {
            series.push(label, value);
        }
        series
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(|l| l.as_str())
            .zip(self.values.iter().copied())
    }

    /// Keep only months that are on the apportionment cutover list.
    pub fn retain_apportioned(&self, apportioned: &ApportionedMonths) -> MetricSeries {
        self.iter()
            .filter(|(label, _)| apportioned.contains(label))
            .map(|(label, value)| (label.to_string(), value))
            .collect()
    }

    /// Keep only strictly positive observations.
    ///
    /// Zero is the domain placeholder for "not yet apportioned", so the
    /// filtered series is the usable fitting history. Positions are
    /// reindexed: the result's observation order is the fit's index axis.
    pub fn nonzero(&self) -> MetricSeries {
        self.iter()
            .filter(|(_, value)| *value > 0.0)
            .map(|(label, value)| (label.to_string(), value))
            .collect()
    }
}

impl FromIterator<(String, f64)> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(pairs: &[(&str, f64)]) -> MetricSeries {
        MetricSeries::from_pairs(pairs.iter().map(|(l, v)| (l.to_string(), *v)))
    }

    #[test]
    fn from_parts_validates_lengths() {
        let result = MetricSeries::from_parts(vec!["May/25".to_string()], vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn nonzero_drops_placeholder_months() {
        let s = series(&[
            ("May/25", 100.0),
            ("Jun/25", 0.0),
            ("Jul/25", 120.0),
            ("Aug/25", 0.0),
            ("Sep/25", 140.0),
        ]);

        let active = s.nonzero();
        assert_eq!(active.len(), 3);
        assert_eq!(active.labels(), &["May/25", "Jul/25", "Sep/25"]);
        assert_eq!(active.values(), &[100.0, 120.0, 140.0]);
    }

    #[test]
    fn nonzero_excludes_negative_values() {
        // Negative rows are data-entry accidents, never valid history.
        let s = series(&[("May/25", -5.0), ("Jun/25", 10.0)]);
        assert_eq!(s.nonzero().values(), &[10.0]);
    }

    #[test]
    fn retain_apportioned_gates_open_months() {
        let s = series(&[
            ("Aug/25", 600.0),
            ("Sep/25", 604.0),
            ("Oct/25", 168.0), // partial month, not yet closed
        ]);
        let closed = ApportionedMonths::from_labels(["Aug/25", "Sep/25"]);

        let gated = s.retain_apportioned(&closed);
        assert_eq!(gated.labels(), &["Aug/25", "Sep/25"]);
    }

    #[test]
    fn iter_yields_pairs_in_order() {
        let s = series(&[("May/25", 1.0), ("Jun/25", 2.0)]);
        let pairs: Vec<(&str, f64)> = s.iter().collect();
        assert_eq!(pairs, vec![("May/25", 1.0), ("Jun/25", 2.0)]);
    }
}
