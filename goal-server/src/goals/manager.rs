//! Goal Definition Manager
//!
//! Create, edit, delete and list objectives and challenges. Writes go through
//! [`GoalRepository::modify`], so the optional `expected_version` check and the
//! write happen under one lock.

use shared::models::{GoalDefinition, GoalFilter, GoalInput, GoalStatus, GoalView, KpiConfig};
use shared::util::{now_millis, snowflake_id};
use std::sync::Arc;

use super::repository::GoalRepository;
use super::status::{build_view, evaluate_status};
use super::validate::{ValidatedGoal, validate_goal_input};
use crate::utils::{AppError, AppResult, Clock, ErrorCode};

/// Reject a write made against a stale copy
pub(crate) fn check_version(goal: &GoalDefinition, expected: Option<u64>) -> AppResult<()> {
    match expected {
        Some(v) if v != goal.version => Err(AppError::conflict(
            ErrorCode::GoalVersionConflict,
            format!(
                "Goal {} was modified (expected version {}, current {})",
                goal.id, v, goal.version
            ),
        )
        .with_detail("goal_id", goal.id)
        .with_detail("current_version", goal.version)),
        _ => Ok(()),
    }
}

fn apply_validated(goal: &mut GoalDefinition, v: ValidatedGoal) {
    goal.family = v.family;
    goal.title = v.title;
    goal.description = v.description;
    goal.scope = v.scope;
    goal.seller_id = v.seller_id;
    goal.visible = v.visible;
    goal.visible_to_sellers = v.visible_to_sellers;
    goal.kind = v.kind;
    goal.target_value = v.target_value;
    goal.unit = v.unit;
    goal.data_entry_responsible = v.data_entry_responsible;
    goal.start_date = v.start_date;
    goal.end_date = v.end_date;
}

#[derive(Clone)]
pub struct GoalManager {
    repo: Arc<dyn GoalRepository>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for GoalManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalManager")
            .field("goals", &self.repo.find_all().len())
            .field("today", &self.clock.today())
            .finish()
    }
}

impl GoalManager {
    pub fn new(repo: Arc<dyn GoalRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub fn create(
        &self,
        manager_id: &str,
        input: &GoalInput,
        config: &KpiConfig,
    ) -> AppResult<GoalView> {
        let v = validate_goal_input(input, config)?;
        let now = now_millis();

        let mut id = snowflake_id();
        while self.repo.find_by_id(id).is_some() {
            id = snowflake_id();
        }

        let goal = GoalDefinition {
            id,
            manager_id: manager_id.to_string(),
            family: v.family,
            title: v.title,
            description: v.description,
            scope: v.scope,
            seller_id: v.seller_id,
            visible: v.visible,
            visible_to_sellers: v.visible_to_sellers,
            kind: v.kind,
            target_value: v.target_value,
            unit: v.unit,
            data_entry_responsible: v.data_entry_responsible,
            current_value: 0.0,
            start_date: v.start_date,
            end_date: v.end_date,
            status: GoalStatus::InProgress,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        let goal = self.repo.insert(goal);

        tracing::info!(
            goal_id = goal.id,
            manager_id = %goal.manager_id,
            family = ?goal.family,
            "Goal created"
        );
        Ok(build_view(&goal, self.clock.today()))
    }

    /// Edit a goal
    ///
    /// `current_value` is preserved; status is re-evaluated, so moving the end
    /// date into the future re-opens the goal.
    pub fn update(
        &self,
        id: i64,
        input: &GoalInput,
        config: &KpiConfig,
        expected_version: Option<u64>,
    ) -> AppResult<GoalView> {
        let validated = validate_goal_input(input, config)?;
        let today = self.clock.today();

        let mut validated = Some(validated);
        let goal = self
            .repo
            .modify(id, &mut |goal| {
                check_version(goal, expected_version)?;
                if let Some(v) = validated.take() {
                    apply_validated(goal, v);
                }
                goal.status =
                    evaluate_status(goal.current_value, goal.target_value, goal.end_date, today);
                Ok(())
            })
            .inspect_err(|e| {
                if e.code == ErrorCode::GoalVersionConflict {
                    tracing::warn!(goal_id = id, "Goal update rejected: {}", e);
                }
            })?;

        tracing::info!(goal_id = id, version = goal.version, status = ?goal.status, "Goal updated");
        Ok(build_view(&goal, today))
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id) {
            return Err(AppError::goal_not_found(id));
        }
        tracing::info!(goal_id = id, "Goal deleted");
        Ok(())
    }

    /// Stored definition, without read-time annotations
    pub fn find(&self, id: i64) -> AppResult<GoalDefinition> {
        self.repo
            .find_by_id(id)
            .ok_or_else(|| AppError::goal_not_found(id))
    }

    pub fn get(&self, id: i64) -> AppResult<GoalView> {
        Ok(build_view(&self.find(id)?, self.clock.today()))
    }

    /// Stored definitions matching `filter`, ordered by end date then id
    pub fn list_definitions(&self, filter: &GoalFilter) -> Vec<GoalDefinition> {
        let mut goals: Vec<_> = self
            .repo
            .find_all()
            .into_iter()
            .filter(|g| filter.matches(g))
            .collect();
        goals.sort_by_key(|g| (g.end_date, g.id));
        goals
    }

    pub fn list(&self, filter: &GoalFilter) -> Vec<GoalView> {
        let today = self.clock.today();
        self.list_definitions(filter)
            .iter()
            .map(|g| build_view(g, today))
            .collect()
    }
}
