//! Statistical utilities shared by the forecasting pipeline.

pub mod analysis;
pub mod metrics;
pub mod outlier;
pub mod stats;

pub use analysis::{growth_analysis, smooth_series, GrowthAnalysis, SmoothingMethod};
pub use metrics::{calculate_metrics, QualityMetrics};
pub use outlier::{detect_outliers, OutlierConfig, OutlierMethod, OutlierReport};
pub use stats::{mean, mean_confidence_interval, median, std_population};
pub use trend_test::{kendall_trend, TrendTest, TREND_SIGNIFICANCE};
