//! Classification of raw statistics into presentation labels.
//!
//! Pure threshold lookups. The numbers come from the quality metrics and
//! trend test; the labels go straight onto dashboard cards.

use crate::utils::metrics::QualityMetrics;

/// R² threshold above which a fit is "excellent".
pub const R_SQUARED_EXCELLENT: f64 = 0.8;
/// R² threshold above which a fit is "moderate".
pub const R_SQUARED_MODERATE: f64 = 0.6;
/// MAPE (percent) below which the error is "low".
pub const MAPE_LOW: f64 = 10.0;
/// MAPE (percent) below which the error is "moderate".
pub const MAPE_MODERATE: f64 = 20.0;

/// Qualitative model-fit label derived from R².
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitQuality {
    Excellent,
    Moderate,
    Low,
}

impl FitQuality {
    pub fn from_r_squared(r_squared: f64) -> Self {
        if r_squared > R_SQUARED_EXCELLENT {
            FitQuality::Excellent
        } else if r_squared > R_SQUARED_MODERATE {
            FitQuality::Moderate
        } else {
            FitQuality::Low
        }
    }
}

impl std::fmt::Display for FitQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FitQuality::Excellent => "Excellent",
            FitQuality::Moderate => "Moderate",
            FitQuality::Low => "Low",
        })
    }
}

/// Qualitative forecast-error label derived from MAPE. `Low` is good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLevel {
    Low,
    Moderate,
    High,
}

impl ErrorLevel {
    pub fn from_mape(mape: f64) -> Self {
        if mape < MAPE_LOW {
            ErrorLevel::Low
        } else if mape < MAPE_MODERATE {
            ErrorLevel::Moderate
        } else {
            ErrorLevel::High
        }
    }
}

impl std::fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ErrorLevel::Low => "Low",
            ErrorLevel::Moderate => "Moderate",
            ErrorLevel::High => "High",
        })
    }
}

/// Overall confidence in a metric's forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Reliable,
    Moderate,
    LowConfidence,
}

impl Confidence {
    pub fn from_scores(r_squared: f64, mape: f64) -> Self {
        if r_squared > R_SQUARED_EXCELLENT && mape < MAPE_LOW {
            Confidence::Reliable
        } else if r_squared > R_SQUARED_MODERATE && mape < MAPE_MODERATE {
            Confidence::Moderate
        } else {
            Confidence::LowConfidence
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Confidence::Reliable => "Reliable",
            Confidence::Moderate => "Moderate",
            Confidence::LowConfidence => "Low confidence",
        })
    }
}

/// Trend direction as classified by the significance-gated trend test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "no significant trend",
        })
    }
}

/// Full qualitative read of a quality record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityAssessment {
    pub fit: FitQuality,
    pub error: ErrorLevel,
    pub overall: Confidence,
}

/// Assess a quality record against the fixed thresholds.
pub fn assess_quality(quality: &QualityMetrics) -> QualityAssessment {
    QualityAssessment {
        fit: FitQuality::from_r_squared(quality.r_squared),
        error: ErrorLevel::from_mape(quality.mape),
        overall: Confidence::from_scores(quality.r_squared, quality.mape),
    }
}
