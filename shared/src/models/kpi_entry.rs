//! KPI Entry Model (daily raw values)

use super::kpi_config::RawMetric;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of raw values for a seller or a whole store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiEntry {
    pub date: NaiveDate,
    /// Set for seller entries
    pub seller_id: Option<String>,
    /// Set for store-level entries
    pub store_id: Option<String>,
    pub ca: Option<f64>,
    pub ventes: Option<f64>,
    pub clients: Option<f64>,
    pub articles: Option<f64>,
}

impl KpiEntry {
    pub fn value(&self, metric: RawMetric) -> Option<f64> {
        match metric {
            RawMetric::Ca => self.ca,
            RawMetric::Ventes => self.ventes,
            RawMetric::Clients => self.clients,
            RawMetric::Articles => self.articles,
        }
    }
}
