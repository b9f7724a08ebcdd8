//! KPI Configuration Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Raw metric entered directly by a seller or a manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawMetric {
    /// Revenue (chiffre d'affaires)
    Ca,
    /// Number of sales / transactions
    Ventes,
    /// Number of clients (prospects walking in)
    Clients,
    /// Number of items sold
    Articles,
}

impl RawMetric {
    pub const ALL: [RawMetric; 4] = [
        RawMetric::Ca,
        RawMetric::Ventes,
        RawMetric::Clients,
        RawMetric::Articles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ca => "ca",
            Self::Ventes => "ventes",
            Self::Clients => "clients",
            Self::Articles => "articles",
        }
    }
}

impl fmt::Display for RawMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RawMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ca" => Ok(Self::Ca),
            "ventes" => Ok(Self::Ventes),
            "clients" => Ok(Self::Clients),
            "articles" => Ok(Self::Articles),
            other => Err(format!("unknown metric '{}'", other)),
        }
    }
}

/// Role allowed to enter data (raw metrics or goal progress)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataEntryRole {
    Seller,
    Manager,
}

impl DataEntryRole {
    /// The role on the other side of a toggle
    pub fn opposite(&self) -> Self {
        match self {
            Self::Seller => Self::Manager,
            Self::Manager => Self::Seller,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seller => "seller",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for DataEntryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataEntryRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seller" => Ok(Self::Seller),
            "manager" => Ok(Self::Manager),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Who enters one raw metric. Never both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricToggle {
    pub seller_entry: bool,
    pub manager_entry: bool,
}

impl MetricToggle {
    /// Tracked by some role
    pub fn is_enabled(&self) -> bool {
        self.seller_entry || self.manager_entry
    }

    pub fn get(&self, role: DataEntryRole) -> bool {
        match role {
            DataEntryRole::Seller => self.seller_entry,
            DataEntryRole::Manager => self.manager_entry,
        }
    }

    pub fn set(&mut self, role: DataEntryRole, enabled: bool) {
        match role {
            DataEntryRole::Seller => self.seller_entry = enabled,
            DataEntryRole::Manager => self.manager_entry = enabled,
        }
    }

    /// The single responsible role, if any
    pub fn responsible(&self) -> Option<DataEntryRole> {
        match (self.seller_entry, self.manager_entry) {
            (true, false) => Some(DataEntryRole::Seller),
            (false, true) => Some(DataEntryRole::Manager),
            _ => None,
        }
    }
}

/// KPI configuration of one manager (one store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiConfig {
    pub manager_id: String,
    /// Every raw metric is always present
    pub raw_metric_toggle: BTreeMap<RawMetric, MetricToggle>,
    /// Last write (Unix millis)
    pub updated_at: i64,
}

impl KpiConfig {
    /// New configuration with every toggle off
    pub fn new(manager_id: impl Into<String>) -> Self {
        Self {
            manager_id: manager_id.into(),
            raw_metric_toggle: RawMetric::ALL
                .iter()
                .map(|m| (*m, MetricToggle::default()))
                .collect(),
            updated_at: 0,
        }
    }

    pub fn toggle(&self, metric: RawMetric) -> MetricToggle {
        self.raw_metric_toggle
            .get(&metric)
            .copied()
            .unwrap_or_default()
    }

    /// Metric tracked by seller or manager
    pub fn is_enabled(&self, metric: RawMetric) -> bool {
        self.toggle(metric).is_enabled()
    }

    /// Metrics tracked by some role
    pub fn enabled_metrics(&self) -> Vec<RawMetric> {
        RawMetric::ALL
            .into_iter()
            .filter(|m| self.is_enabled(*m))
            .collect()
    }
}

/// Toggle payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiToggleUpdate {
    pub metric: RawMetric,
    pub role: DataEntryRole,
    pub enabled: bool,
}

/// Whole-map overwrite payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiConfigReplace {
    pub raw_metric_toggle: BTreeMap<RawMetric, MetricToggle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_all_off() {
        let config = KpiConfig::new("m1");
        assert_eq!(config.raw_metric_toggle.len(), 4);
        assert!(config.enabled_metrics().is_empty());
    }

    #[test]
    fn test_toggle_responsible() {
        let mut t = MetricToggle::default();
        assert_eq!(t.responsible(), None);
        t.set(DataEntryRole::Seller, true);
        assert_eq!(t.responsible(), Some(DataEntryRole::Seller));
        assert!(t.is_enabled());
    }

    #[test]
    fn test_config_serializes_metric_keys() {
        let config = KpiConfig::new("m1");
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["raw_metric_toggle"]["ca"]["seller_entry"].is_boolean());
        assert!(json["raw_metric_toggle"]["articles"].is_object());
    }

    #[test]
    fn test_parse_metric_and_role() {
        assert_eq!("CA".parse::<RawMetric>(), Ok(RawMetric::Ca));
        assert!("prospects".parse::<RawMetric>().is_err());
        assert_eq!("manager".parse::<DataEntryRole>(), Ok(DataEntryRole::Manager));
        assert_eq!(DataEntryRole::Seller.opposite(), DataEntryRole::Manager);
    }
}
