//! Statistical helper functions.

use crate::error::{ForecastError, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by n).
///
/// This is the residual-spread estimator the confidence bands use.
pub fn std_population(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

/// Sample standard deviation (divide by n-1).
pub fn std_sample(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Median of a slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Standard error of the mean (sample std / sqrt(n)).
pub fn standard_error(values: &[f64]) -> f64 {
    std_sample(values) / (values.len() as f64).sqrt()
}

/// Two-sided confidence interval for the mean of a sample, using the
/// Student's t distribution with n-1 degrees of freedom.
///
/// `confidence` is the coverage level, e.g. `0.95`.
pub fn mean_confidence_interval(values: &[f64], confidence: f64) -> Result<(f64, f64)> {
    if values.len() < 2 {
        return Err(ForecastError::InsufficientData {
            needed: 2,
            got: values.len(),
        });
    }
    if !(0.0..1.0).contains(&confidence) || confidence <= 0.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "confidence must be in (0, 1), got {confidence}"
        )));
    }

    let m = mean(values);
    let sem = standard_error(values);
    let df = (values.len() - 1) as f64;

    let t_dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| ForecastError::Computation(format!("t distribution: {e}")))?;
    let t = t_dist.inverse_cdf(1.0 - (1.0 - confidence) / 2.0);

    Ok((m - t * sem, m + t * sem))
}

/// Percentile of a slice with linear interpolation between ranks,
/// `p` in `[0, 100]`.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = p.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}
