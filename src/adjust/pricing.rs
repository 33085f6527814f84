//! Price-plan migration adjustment.
//!
//! When the business migrates customers to a new price point, revenue and
//! LTV drift toward the new average ticket as adoption ramps up. The ramp
//! is a hand-specified fraction per month label; the factor blends the
//! new ticket against the current one proportionally to that fraction.

use crate::core::Metric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether the pricing migration moves a metric at all.
pub fn applies_to(metric: Metric) -> bool {
    matches!(metric, Metric::WebRevenue | Metric::Ltv)
}

/// Migration to a new average price point, with a per-month adoption ramp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingMigration {
    /// Average ticket once migration is complete.
    pub new_avg_ticket: f64,
    /// Adoption fraction per month label, `0.0..=1.0`.
    ramp: BTreeMap<String, f64>,
}

impl PricingMigration {
    pub fn new(new_avg_ticket: f64) -> Self {
        Self {
            new_avg_ticket,
            ramp: BTreeMap::new(),
        }
    }

    /// Add or replace the adoption fraction for a month.
    pub fn with_ramp_month(mut self, label: impl Into<String>, fraction: f64) -> Self {
        self.ramp.insert(label.into(), fraction);
        self
    }

    pub fn ramp_fraction(&self, label: &str) -> Option<f64> {
        self.ramp.get(label).copied()
    }

    /// Multiplicative factor for a month.
    ///
    /// `1 + (new/current - 1) × ramp(label)`. Months outside the ramp
    /// schedule and a non-positive current ticket both yield `1.0`
    /// (pass-through).
    pub fn factor(&self, current_avg_ticket: f64, month_label: &str) -> f64 {
        if current_avg_ticket <= 0.0 {
            return 1.0;
        }
        match self.ramp_fraction(month_label) {
            Some(fraction) => {
                1.0 + (self.new_avg_ticket / current_avg_ticket - 1.0) * fraction
            }
            None => 1.0,
        }
    }

    /// Apply the migration factor to a value of `metric` for a month.
    pub fn adjust(
        &self,
        value: f64,
        month_label: &str,
        metric: Metric,
        current_avg_ticket: f64,
    ) -> f64 {
        if !applies_to(metric) {
            return value;
        }
        value * self.factor(current_avg_ticket, month_label)
    }
}
