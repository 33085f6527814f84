//! Trend models.

mod traits;

pub mod linear_trend;

pub use linear_trend::LinearTrend;
pub use traits::{BoxedForecaster, Forecaster};
