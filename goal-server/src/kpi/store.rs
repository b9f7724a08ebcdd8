//! KPI Config Store
//!
//! One [`KpiConfig`] per manager, last write wins. A metric is entered by the
//! seller or by the manager, never both: enabling one role while the other is
//! on is rejected, the caller must switch the other role off first.

use dashmap::DashMap;
use shared::models::{DataEntryRole, KpiConfig, MetricToggle, RawMetric};
use shared::util::now_millis;
use std::collections::BTreeMap;

use crate::utils::{AppError, AppResult, ErrorCode};

/// Apply one toggle write to a configuration
///
/// Disabling never fails. Enabling fails with `KpiToggleConflict` when the
/// opposite role already enters the metric.
pub fn apply_toggle(
    config: &mut KpiConfig,
    metric: RawMetric,
    role: DataEntryRole,
    enabled: bool,
) -> AppResult<()> {
    let mut toggle = config.toggle(metric);
    if enabled && toggle.get(role.opposite()) {
        return Err(AppError::conflict(
            ErrorCode::KpiToggleConflict,
            format!(
                "{} is already entered by {}, disable it first",
                metric,
                role.opposite()
            ),
        )
        .with_detail("metric", metric.as_str())
        .with_detail("responsible", role.opposite().as_str()));
    }
    toggle.set(role, enabled);
    config.raw_metric_toggle.insert(metric, toggle);
    Ok(())
}

/// In-memory KPI configuration store keyed by manager id
#[derive(Debug, Default)]
pub struct KpiConfigStore {
    configs: DashMap<String, KpiConfig>,
}

impl KpiConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored configuration of a manager
    pub fn get_config(&self, manager_id: &str) -> AppResult<KpiConfig> {
        self.configs
            .get(manager_id)
            .map(|c| c.clone())
            .ok_or_else(|| AppError::kpi_config_not_found(manager_id))
    }

    /// Stored configuration, or an all-off one (not stored)
    pub fn get_or_default(&self, manager_id: &str) -> KpiConfig {
        self.get_config(manager_id)
            .unwrap_or_else(|_| KpiConfig::new(manager_id))
    }

    /// Enable or disable one role on one metric
    pub fn set_toggle(
        &self,
        manager_id: &str,
        metric: RawMetric,
        role: DataEntryRole,
        enabled: bool,
    ) -> AppResult<KpiConfig> {
        let mut entry = self
            .configs
            .entry(manager_id.to_string())
            .or_insert_with(|| KpiConfig::new(manager_id));

        if let Err(e) = apply_toggle(&mut entry, metric, role, enabled) {
            tracing::warn!(
                manager_id = %manager_id,
                metric = %metric,
                role = %role,
                "KPI toggle rejected: {}",
                e
            );
            return Err(e);
        }
        entry.updated_at = now_millis();

        tracing::info!(
            manager_id = %manager_id,
            metric = %metric,
            role = %role,
            enabled,
            "KPI toggle updated"
        );
        Ok(entry.clone())
    }

    /// Overwrite the whole toggle map
    ///
    /// Metrics missing from `toggles` are switched off. Rejected as a whole if
    /// any metric has both roles on.
    pub fn replace_config(
        &self,
        manager_id: &str,
        toggles: BTreeMap<RawMetric, MetricToggle>,
    ) -> AppResult<KpiConfig> {
        let conflicting: Vec<&str> = toggles
            .iter()
            .filter(|(_, t)| t.seller_entry && t.manager_entry)
            .map(|(m, _)| m.as_str())
            .collect();
        if !conflicting.is_empty() {
            tracing::warn!(manager_id = %manager_id, ?conflicting, "KPI config overwrite rejected");
            return Err(AppError::conflict(
                ErrorCode::KpiToggleConflict,
                format!(
                    "Seller and manager entry both enabled for: {}",
                    conflicting.join(", ")
                ),
            )
            .with_detail("metrics", conflicting));
        }

        let mut config = KpiConfig::new(manager_id);
        for (metric, toggle) in toggles {
            config.raw_metric_toggle.insert(metric, toggle);
        }
        config.updated_at = now_millis();
        self.configs.insert(manager_id.to_string(), config.clone());

        tracing::info!(manager_id = %manager_id, "KPI config overwritten");
        Ok(config)
    }
}
