//! Goal input validation
//!
//! Every rule is checked and all violations are reported together.

use chrono::NaiveDate;
use shared::models::{
    DataEntryRole, GoalFamily, GoalInput, GoalKind, GoalKindTag, GoalScope, KpiConfig, RawMetric,
};
use std::collections::BTreeSet;

use crate::utils::{AppError, AppResult};
use crate::utils::validation::{
    MAX_GOAL_VALUE, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, Violations,
};

/// Normalized goal fields, ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedGoal {
    pub family: GoalFamily,
    pub title: String,
    pub description: Option<String>,
    pub scope: GoalScope,
    pub seller_id: Option<String>,
    pub visible: bool,
    pub visible_to_sellers: BTreeSet<String>,
    pub kind: GoalKind,
    pub target_value: f64,
    pub unit: String,
    pub data_entry_responsible: DataEntryRole,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Blank strings count as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve the kind payload, recording violations on the way
fn resolve_kind(input: &GoalInput, config: &KpiConfig, v: &mut Violations) -> Option<GoalKind> {
    let payloads = [
        (GoalKindTag::KpiStandard, "kpi_name", present(&input.kpi_name)),
        (GoalKindTag::ProductFocus, "product_name", present(&input.product_name)),
        (
            GoalKindTag::Custom,
            "custom_description",
            present(&input.custom_description),
        ),
    ];

    let mut selected = None;
    for (tag, field, value) in payloads {
        if tag == input.kind {
            match value {
                Some(s) => selected = Some((field, s)),
                None => v.push(field, format!("{field} is required for this kind")),
            }
        } else if value.is_some() {
            v.push(field, format!("{field} is not allowed for this kind"));
        }
    }
    let (field, value) = selected?;

    match input.kind {
        GoalKindTag::KpiStandard => match value.parse::<RawMetric>() {
            Ok(metric) if config.is_enabled(metric) => Some(GoalKind::KpiStandard { kpi_name: metric }),
            Ok(metric) => {
                v.push(field, format!("metric '{metric}' is not tracked"));
                None
            }
            Err(_) => {
                v.push(field, format!("unknown metric '{value}'"));
                None
            }
        },
        GoalKindTag::ProductFocus => {
            v.required_text(value, field, MAX_NAME_LEN);
            Some(GoalKind::ProductFocus {
                product_name: value.to_string(),
            })
        }
        GoalKindTag::Custom => {
            v.required_text(value, field, MAX_NOTE_LEN);
            Some(GoalKind::Custom {
                custom_description: value.to_string(),
            })
        }
    }
}

/// Validate a create/update payload against the manager's KPI configuration
pub fn validate_goal_input(input: &GoalInput, config: &KpiConfig) -> AppResult<ValidatedGoal> {
    let mut v = Violations::new();

    v.required_text(&input.title, "title", MAX_NAME_LEN);
    v.optional_text(&input.description, "description", MAX_NOTE_LEN);
    if input.unit.chars().count() > MAX_SHORT_TEXT_LEN {
        v.push("unit", format!("unit is too long (max {MAX_SHORT_TEXT_LEN})"));
    }

    if !input.target_value.is_finite() || input.target_value <= 0.0 {
        v.push("target_value", "target_value must be a positive number");
    } else if input.target_value > MAX_GOAL_VALUE {
        v.push(
            "target_value",
            format!("target_value must not exceed {MAX_GOAL_VALUE}"),
        );
    }

    let seller_id = present(&input.seller_id).map(str::to_string);
    if input.scope == GoalScope::Individual {
        match &seller_id {
            None => v.push("seller_id", "seller_id is required for individual goals"),
            Some(id) if id.chars().count() > MAX_SHORT_TEXT_LEN => {
                v.push("seller_id", "seller_id is too long")
            }
            Some(_) => {}
        }
    }

    if input.visible_to_sellers.iter().any(|s| s.trim().is_empty()) {
        v.push("visible_to_sellers", "seller ids must not be empty");
    }

    let kind = resolve_kind(input, config, &mut v);

    if input.start_date > input.end_date {
        v.push("end_date", "end_date must not be before start_date");
    }

    v.into_result()?;
    let kind = kind.ok_or_else(|| AppError::validation("Invalid goal kind"))?;

    let description = present(&input.description).map(str::to_string);
    let seller_id = match input.scope {
        GoalScope::Individual => seller_id,
        GoalScope::Collective => None,
    };
    let visible_to_sellers = if input.visible {
        input
            .visible_to_sellers
            .iter()
            .map(|s| s.trim().to_string())
            .collect()
    } else {
        BTreeSet::new()
    };

    Ok(ValidatedGoal {
        family: input.family,
        title: input.title.trim().to_string(),
        description,
        scope: input.scope,
        seller_id,
        visible: input.visible,
        visible_to_sellers,
        kind,
        target_value: input.target_value,
        unit: input.unit.trim().to_string(),
        data_entry_responsible: input.data_entry_responsible,
        start_date: input.start_date,
        end_date: input.end_date,
    })
}
