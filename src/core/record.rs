//! Monthly metric records and the table that holds them.

use crate::core::series::MetricSeries;
use serde::{Deserialize, Serialize};

/// Identifier for a forecastable dashboard metric.
///
/// The variant order is the fixed presentation order used by the batch
/// forecasting API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Sessions,
    FirstVisits,
    Leads,
    WebClients,
    TcUsersPct,
    TcLeadsPct,
    WebRevenue,
    AvgTicket,
    MetaCost,
    GoogleCost,
    TotalAds,
    Cac,
    Ltv,
    CacLtvRatio,
    RoiPct,
}

impl Metric {
    /// All metrics in presentation order.
    pub const ALL: [Metric; 15] = [
        Metric::Sessions,
        Metric::FirstVisits,
        Metric::Leads,
        Metric::WebClients,
        Metric::TcUsersPct,
        Metric::TcLeadsPct,
        Metric::WebRevenue,
        Metric::AvgTicket,
        Metric::MetaCost,
        Metric::GoogleCost,
        Metric::TotalAds,
        Metric::Cac,
        Metric::Ltv,
        Metric::CacLtvRatio,
        Metric::RoiPct,
    ];

    /// Human-readable column name.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Sessions => "Sessions",
            Metric::FirstVisits => "First Visits",
            Metric::Leads => "Leads",
            Metric::WebClients => "Web Clients",
            Metric::TcUsersPct => "User Conversion (%)",
            Metric::TcLeadsPct => "Lead Conversion (%)",
            Metric::WebRevenue => "Web Revenue",
            Metric::AvgTicket => "Average Ticket",
            Metric::MetaCost => "Meta Spend",
            Metric::GoogleCost => "Google Spend",
            Metric::TotalAds => "Total Ads",
            Metric::Cac => "CAC",
            Metric::Ltv => "LTV",
            Metric::CacLtvRatio => "CAC:LTV",
            Metric::RoiPct => "ROI (%)",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of monthly dashboard metrics for a single tenant.
///
/// The month label (e.g. `"May/25"`) is the natural key. A value of zero
/// means the month has not been apportioned for that metric yet; it is a
/// placeholder, not a measurement, and the forecaster excludes it from
/// fitting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlyMetricRecord {
    pub month_label: String,
    pub sessions: u64,
    pub first_visits: u64,
    pub leads: u64,
    pub web_clients: u64,
    pub tc_users_pct: f64,
    pub tc_leads_pct: f64,
    pub web_revenue: f64,
    pub avg_ticket: f64,
    pub meta_cost: f64,
    pub google_cost: f64,
    pub total_ads: f64,
    pub cac: f64,
    pub ltv: f64,
    pub cac_ltv_ratio: f64,
    pub roi_pct: f64,
}

impl MonthlyMetricRecord {
    /// Create an empty (unapportioned) record for a month.
    pub fn new(month_label: impl Into<String>) -> Self {
        Self {
            month_label: month_label.into(),
            ..Self::default()
        }
    }

    /// Compute the entry-time derived fields.
    ///
    /// `total_ads` and `cac_ltv_ratio` are fixed when the row is entered,
    /// not re-derived at read time. Call this after filling in the channel
    /// costs, CAC and LTV.
    pub fn derive_entry_fields(&mut self) {
        self.total_ads = self.meta_cost + self.google_cost;
        self.cac_ltv_ratio = crate::kpi::cac_ltv_ratio(self.ltv, self.cac);
    }

    /// Value of a metric column as `f64`.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sessions => self.sessions as f64,
            Metric::FirstVisits => self.first_visits as f64,
            Metric::Leads => self.leads as f64,
            Metric::WebClients => self.web_clients as f64,
            Metric::TcUsersPct => self.tc_users_pct,
            Metric::TcLeadsPct => self.tc_leads_pct,
            Metric::WebRevenue => self.web_revenue,
            Metric::AvgTicket => self.avg_ticket,
            Metric::MetaCost => self.meta_cost,
            Metric::GoogleCost => self.google_cost,
            Metric::TotalAds => self.total_ads,
            Metric::Cac => self.cac,
            Metric::Ltv => self.ltv,
            Metric::CacLtvRatio => self.cac_ltv_ratio,
            Metric::RoiPct => self.roi_pct,
        }
    }
}

/// Time-ordered collection of monthly records.
///
/// Rows are kept in insertion order, which is expected to be chronological
/// (month labels are ordinal-sortable tokens owned by the caller). Inserting
/// a row for an existing month replaces it in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsTable {
    records: Vec<MonthlyMetricRecord>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for its month.
    ///
    /// Entry-time derived fields are computed here so every stored row
    /// satisfies the `total_ads`/`cac_ltv_ratio` invariants.
    pub fn insert(&mut self, mut record: MonthlyMetricRecord) {
        record.derive_entry_fields();
        match self
            .records
            .iter_mut()
            .find(|r| r.month_label == record.month_label)
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    /// Remove the record for a month. Administrative use only.
    pub fn remove(&mut self, month_label: &str) -> Option<MonthlyMetricRecord> {
        let idx = self
            .records
            .iter()
            .position(|r| r.month_label == month_label)?;
        Some(self.records.remove(idx))
    }

    pub fn get(&self, month_label: &str) -> Option<&MonthlyMetricRecord> {
        self.records.iter().find(|r| r.month_label == month_label)
    }

    pub fn records(&self) -> &[MonthlyMetricRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Month labels in table order.
    pub fn month_labels(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.month_label.as_str()).collect()
    }

    /// Extract one metric as an ordered labeled series.
    pub fn series(&self, metric: Metric) -> MetricSeries {
        MetricSeries::from_pairs(
            self.records
                .iter()
                .map(|r| (r.month_label.clone(), r.value(metric))),
        )
    }

    /// Most recent nonzero value of a metric, if any.
    ///
    /// Used to read the "current" average ticket out of history for the
    /// pricing-migration adjustment.
    pub fn latest_nonzero(&self, metric: Metric) -> Option<f64> {
        self.records
            .iter()
            .rev()
            .map(|r| r.value(metric))
            .find(|v| *v > 0.0)
    }
}

impl FromIterator<MonthlyMetricRecord> for MetricsTable {
    fn from_iter<I: IntoIterator<Item = MonthlyMetricRecord>>(iter: I) -> Self {
        let mut table = MetricsTable::new();
        for record in iter {
            table.insert(record);
        }
        table
    }
}
