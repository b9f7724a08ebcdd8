//! Derived Metric Model
//!
//! Ratios computed from raw metrics. Never stored.

use super::kpi_config::{KpiConfig, RawMetric};
use super::kpi_entry::KpiEntry;
use serde::{Deserialize, Serialize};

/// Derived metric identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedMetricId {
    /// Average basket: ca / ventes
    PanierMoyen,
    /// Conversion rate: ventes / clients
    TauxTransformation,
    /// Units per transaction: articles / ventes
    IndiceVente,
}

impl DerivedMetricId {
    pub const ALL: [DerivedMetricId; 3] = [
        DerivedMetricId::PanierMoyen,
        DerivedMetricId::TauxTransformation,
        DerivedMetricId::IndiceVente,
    ];

    /// (numerator, denominator)
    pub fn operands(&self) -> (RawMetric, RawMetric) {
        match self {
            Self::PanierMoyen => (RawMetric::Ca, RawMetric::Ventes),
            Self::TauxTransformation => (RawMetric::Ventes, RawMetric::Clients),
            Self::IndiceVente => (RawMetric::Articles, RawMetric::Ventes),
        }
    }

    /// Raw metrics that must all be tracked
    pub fn prerequisites(&self) -> [RawMetric; 2] {
        let (num, den) = self.operands();
        [num, den]
    }
}

/// Computed value; `value` is `None` exactly when `active` is false
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetricValue {
    pub id: DerivedMetricId,
    pub value: Option<f64>,
    pub active: bool,
}

/// Raw metric totals over some window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawValues {
    #[serde(default)]
    pub ca: f64,
    #[serde(default)]
    pub ventes: f64,
    #[serde(default)]
    pub clients: f64,
    #[serde(default)]
    pub articles: f64,
}

impl RawValues {
    pub fn get(&self, metric: RawMetric) -> f64 {
        match metric {
            RawMetric::Ca => self.ca,
            RawMetric::Ventes => self.ventes,
            RawMetric::Clients => self.clients,
            RawMetric::Articles => self.articles,
        }
    }

    pub fn add(&mut self, metric: RawMetric, value: f64) {
        match metric {
            RawMetric::Ca => self.ca += value,
            RawMetric::Ventes => self.ventes += value,
            RawMetric::Clients => self.clients += value,
            RawMetric::Articles => self.articles += value,
        }
    }

    /// Sum a feed of entries, reading only metrics tracked in `config`
    ///
    /// Missing values count as 0.
    pub fn from_entries<'a, I>(entries: I, config: &KpiConfig) -> Self
    where
        I: IntoIterator<Item = &'a KpiEntry>,
    {
        let metrics = config.enabled_metrics();
        let mut raw = Self::default();
        for entry in entries {
            for metric in &metrics {
                if let Some(v) = entry.value(*metric)
                    && v.is_finite()
                {
                    raw.add(*metric, v);
                }
            }
        }
        raw
    }
}
