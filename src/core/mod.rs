//! Core data model: monthly records, metric series, forecast results.

mod apportion;
mod forecast;
mod record;
mod series;

pub use apportion::ApportionedMonths;
pub use forecast::ScenarioForecast;
pub use record::{Metric, MetricsTable, MonthlyMetricRecord};
pub use series::MetricSeries;
