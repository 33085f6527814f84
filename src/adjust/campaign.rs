//! Promotional-campaign adjustment calendar.
//!
//! A campaign (a Black-Friday push, a seasonal promo) moves traffic,
//! revenue, acquisition cost and ad spend by amounts the statistical
//! model cannot know about. The calendar encodes those expectations as
//! per-month multipliers, keyed by the exact month label, so a planner
//! can audit and edit them without touching the regression.

use crate::core::Metric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which multiplier of a [`CampaignImpact`] applies to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignChannel {
    /// Sessions, first visits, leads, clients.
    Traffic,
    /// Web revenue.
    Revenue,
    /// Customer acquisition cost.
    AcquisitionCost,
    /// Ad spend, total and per channel.
    Spend,
}

/// Campaign channel for a metric, or `None` when campaigns do not move it.
pub fn channel_for(metric: Metric) -> Option<CampaignChannel> {
    match metric {
        Metric::Sessions | Metric::FirstVisits | Metric::Leads | Metric::WebClients => {
            Some(CampaignChannel::Traffic)
        }
        Metric::WebRevenue => Some(CampaignChannel::Revenue),
        Metric::Cac => Some(CampaignChannel::AcquisitionCost),
        Metric::TotalAds | Metric::MetaCost | Metric::GoogleCost => Some(CampaignChannel::Spend),
        _ => None,
    }
}

/// Multipliers for one campaign month. `1.0` means unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampaignImpact {
    pub traffic: f64,
    pub revenue: f64,
    pub acquisition_cost: f64,
    pub spend: f64,
}

impl Default for CampaignImpact {
    fn default() -> Self {
        Self {
            traffic: 1.0,
            revenue: 1.0,
            acquisition_cost: 1.0,
            spend: 1.0,
        }
    }
}

impl CampaignImpact {
    pub fn new(traffic: f64, revenue: f64, acquisition_cost: f64, spend: f64) -> Self {
        Self {
            traffic,
            revenue,
            acquisition_cost,
            spend,
        }
    }

    fn multiplier(&self, channel: CampaignChannel) -> f64 {
        match channel {
            CampaignChannel::Traffic => self.traffic,
            CampaignChannel::Revenue => self.revenue,
            CampaignChannel::AcquisitionCost => self.acquisition_cost,
            CampaignChannel::Spend => self.spend,
        }
    }
}

/// Per-month campaign impact table.
///
/// Months and metrics absent from the table pass through unchanged; a
/// calendar that does not cover a requested month is a configuration gap,
/// not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignCalendar {
    months: BTreeMap<String, CampaignImpact>,
}

impl CampaignCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the impact record for a month.
    pub fn with_month(mut self, label: impl Into<String>, impact: CampaignImpact) -> Self {
        self.months.insert(label.into(), impact);
        self
    }

    pub fn get(&self, label: &str) -> Option<&CampaignImpact> {
        self.months.get(label)
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Apply the campaign multiplier for `(month, metric)` to a value.
    ///
    /// Pure lookup-and-multiply; identical inputs always produce
    /// identical outputs.
    pub fn adjust(&self, value: f64, month_label: &str, metric: Metric) -> f64 {
        match (self.months.get(month_label), channel_for(metric)) {
            (Some(impact), Some(channel)) => value * impact.multiplier(channel),
            _ => value,
        }
    }
}
