//! Apportionment cutover list.
//!
//! A month's metrics are finalized ("apportioned") on the first business
//! day of the following month. Only apportioned months are eligible as
//! forecasting history. The list is owned by the surrounding layer and
//! passed in as configuration; nothing here is a global.

use serde::{Deserialize, Serialize};

/// The set of month labels whose metrics are closed for forecasting.
///
/// Labels are kept in the order they were closed, so the last entry is
/// the most recently apportioned month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApportionedMonths {
    labels: Vec<String>,
}

impl ApportionedMonths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels<L, I>(labels: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = L>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Mark a month as apportioned. Duplicates are ignored.
    pub fn close(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// The most recently apportioned month, if any.
    pub fn latest(&self) -> Option<&str> {
        self.labels.last().map(|l| l.as_str())
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
