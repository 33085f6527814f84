//! Business-event adjustments layered onto the statistical forecast.
//!
//! The regression cannot see planned price changes or marketing
//! campaigns. This layer injects that domain knowledge as explicit
//! multiplicative corrections after the fit: campaign first, then
//! pricing, applied to each scenario band independently so the band
//! structure survives.

pub mod campaign;
pub mod pricing;

pub use campaign::{channel_for, CampaignCalendar, CampaignChannel, CampaignImpact};
pub use pricing::{applies_to, PricingMigration};

use crate::core::{Metric, ScenarioForecast};
use crate::error::{ForecastError, Result};

/// The full set of known business events to apply to a forecast.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventAdjustments {
    pub campaign: Option<CampaignCalendar>,
    pub pricing: Option<PricingMigration>,
}

impl EventAdjustments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_campaign(mut self, calendar: CampaignCalendar) -> Self {
        self.campaign = Some(calendar);
        self
    }

    pub fn with_pricing(mut self, migration: PricingMigration) -> Self {
        self.pricing = Some(migration);
        self
    }

    /// Adjust a single forecast value for one future month.
    ///
    /// `current_avg_ticket` is the latest apportioned average ticket from
    /// history; the pricing factor blends the new price point against it.
    pub fn adjust_value(
        &self,
        value: f64,
        month_label: &str,
        metric: Metric,
        current_avg_ticket: f64,
    ) -> f64 {
        let mut adjusted = value;
        if let Some(calendar) = &self.campaign {
            adjusted = calendar.adjust(adjusted, month_label, metric);
        }
        if let Some(migration) = &self.pricing {
            adjusted = migration.adjust(adjusted, month_label, metric, current_avg_ticket);
        }
        adjusted
    }

    /// Adjust all three scenario bands for the given future months.
    ///
    /// `future_labels` must name one month per forecasted period, in
    /// order.
    pub fn adjust_forecast<S: AsRef<str>>(
        &self,
        forecast: &ScenarioForecast,
        future_labels: &[S],
        metric: Metric,
        current_avg_ticket: f64,
    ) -> Result<ScenarioForecast> {
        if future_labels.len() != forecast.horizon() {
            return Err(ForecastError::DimensionMismatch {
                expected: forecast.horizon(),
                got: future_labels.len(),
            });
        }

        Ok(forecast.map_bands(|i, value| {
            self.adjust_value(value, future_labels[i].as_ref(), metric, current_avg_ticket)
        }))
    }
}
