//! Goal Model (objectives & challenges)
//!
//! Objectives and challenges share one shape. `family` tells them apart;
//! objectives call their dates "period start/end", challenges "start/end date".

use super::kpi_config::{DataEntryRole, RawMetric};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Goal family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalFamily {
    /// Fixed period target
    Objective,
    /// Time-boxed campaign
    Challenge,
}

/// Who the goal applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalScope {
    Collective,
    Individual,
}

/// Goal status. Always derived, never written by callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    InProgress,
    Achieved,
    Failed,
}

impl GoalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Achieved | Self::Failed)
    }
}

/// What the goal measures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalKind {
    KpiStandard { kpi_name: RawMetric },
    ProductFocus { product_name: String },
    Custom { custom_description: String },
}

impl GoalKind {
    pub fn tag(&self) -> GoalKindTag {
        match self {
            Self::KpiStandard { .. } => GoalKindTag::KpiStandard,
            Self::ProductFocus { .. } => GoalKindTag::ProductFocus,
            Self::Custom { .. } => GoalKindTag::Custom,
        }
    }

    /// Referenced raw metric for KPI goals
    pub fn metric(&self) -> Option<RawMetric> {
        match self {
            Self::KpiStandard { kpi_name } => Some(*kpi_name),
            _ => None,
        }
    }
}

/// Kind selector on input payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKindTag {
    KpiStandard,
    ProductFocus,
    Custom,
}

/// Goal entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalDefinition {
    pub id: i64,
    /// Owning manager
    pub manager_id: String,
    pub family: GoalFamily,
    pub title: String,
    pub description: Option<String>,
    pub scope: GoalScope,
    /// Present iff scope is individual
    pub seller_id: Option<String>,
    pub visible: bool,
    /// Empty means every seller in scope
    pub visible_to_sellers: BTreeSet<String>,
    #[serde(flatten)]
    pub kind: GoalKind,
    pub target_value: f64,
    pub unit: String,
    pub data_entry_responsible: DataEntryRole,
    pub current_value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: GoalStatus,
    /// Incremented on every write
    pub version: u64,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_visible() -> bool {
    true
}

/// Create / update goal payload
///
/// Carries the three kind payloads flat so that a mismatch between `kind` and
/// the populated field can be reported instead of silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInput {
    pub family: GoalFamily,
    pub title: String,
    pub description: Option<String>,
    pub scope: GoalScope,
    pub seller_id: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub visible_to_sellers: Vec<String>,
    pub kind: GoalKindTag,
    pub kpi_name: Option<String>,
    pub product_name: Option<String>,
    pub custom_description: Option<String>,
    pub target_value: f64,
    #[serde(default)]
    pub unit: String,
    pub data_entry_responsible: DataEntryRole,
    #[serde(alias = "period_start")]
    pub start_date: NaiveDate,
    #[serde(alias = "period_end")]
    pub end_date: NaiveDate,
}

/// Create request: owning manager plus the goal fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalCreate {
    pub manager_id: String,
    #[serde(flatten)]
    pub input: GoalInput,
}

/// Update request: goal fields plus an optional optimistic-lock version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalUpdate {
    #[serde(default)]
    pub expected_version: Option<u64>,
    #[serde(flatten)]
    pub input: GoalInput,
}

/// List filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalFilter {
    pub manager_id: Option<String>,
    pub family: Option<GoalFamily>,
    pub scope: Option<GoalScope>,
    pub visible: Option<bool>,
}

impl GoalFilter {
    pub fn matches(&self, goal: &GoalDefinition) -> bool {
        self.manager_id
            .as_ref()
            .is_none_or(|m| *m == goal.manager_id)
            && self.family.is_none_or(|f| f == goal.family)
            && self.scope.is_none_or(|s| s == goal.scope)
            && self.visible.is_none_or(|v| v == goal.visible)
    }
}

/// Progress report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub value: f64,
    pub expected_version: Option<u64>,
}

/// Goal as rendered: effective status plus progress annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: GoalDefinition,
    /// 0..=100
    pub percent_complete: u32,
    /// Overshoot above target, 0 when not reached
    pub exceeded_by: f64,
}
