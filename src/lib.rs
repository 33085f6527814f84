//! # metricscast
//!
//! Forecasting engine for monthly marketing KPIs (sessions, leads,
//! revenue, ad spend, CAC, LTV, ROI).
//!
//! The pipeline fits a linear trend per metric over the apportioned,
//! nonzero history, extrapolates it with ±1.96σ optimistic/conservative
//! bands, scores the in-sample fit (R², RMSE, MAE, MAPE) and runs a
//! Kendall rank-correlation trend test. Known business events (a price
//! plan migration, a promotional campaign) are layered on afterwards as
//! auditable multiplicative adjustments rather than being folded into
//! the regression.
//!
//! ```
//! use metricscast::prelude::*;
//!
//! let history = MetricSeries::from_pairs([
//!     ("May/25".to_string(), 270.0),
//!     ("Jun/25".to_string(), 290.0),
//!     ("Jul/25".to_string(), 401.0),
//!     ("Aug/25".to_string(), 600.0),
//!     ("Sep/25".to_string(), 604.0),
//! ]);
//!
//! let forecaster = ScenarioForecaster::new();
//! let forecast = forecaster.forecast(&history, 3).unwrap();
//! assert_eq!(forecast.horizon(), 3);
//! ```

pub mod adjust;
pub mod core;
pub mod error;
pub mod interpret;
pub mod kpi;
pub mod models;
pub mod scenario;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::adjust::{CampaignCalendar, CampaignImpact, EventAdjustments, PricingMigration};
    pub use crate::core::{
        ApportionedMonths, Metric, MetricSeries, MetricsTable, MonthlyMetricRecord,
        ScenarioForecast,
    };
    pub use crate::error::{ForecastError, Result};
    pub use crate::interpret::{assess_quality, Confidence, FitQuality, TrendDirection};
    pub use crate::models::{Forecaster, LinearTrend};
    pub use crate::scenario::{ForecastCache, ScenarioForecaster};
    pub use crate::utils::{calculate_metrics, kendall_trend, QualityMetrics, TrendTest};
}
