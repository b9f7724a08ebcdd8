//! Progress Tracker
//!
//! Only the goal's responsible role may report progress. A report replaces
//! the current value (it is not added) and re-evaluates status at today's
//! business date. A goal whose effective status is terminal accepts no
//! further progress, whether or not that status has been persisted yet.

use shared::models::{
    DataEntryRole, GoalDefinition, GoalScope, GoalStatus, GoalView, KpiConfig, KpiEntry,
};
use std::sync::Arc;

use super::manager::check_version;
use super::repository::GoalRepository;
use super::status::{build_view, effective_status, evaluate_status};
use crate::metrics::add_f64;
use crate::utils::time::end_passed;
use crate::utils::validation::MAX_GOAL_VALUE;
use crate::utils::{AppError, AppResult, Clock, ErrorCode};

/// Suggested current value for a KPI goal, summed from the daily feed
///
/// Only entries dated within the goal's period count; individual goals only
/// count their seller's entries. `None` for non-KPI goals or when the metric
/// is no longer tracked.
pub fn progress_from_entries(
    goal: &GoalDefinition,
    entries: &[KpiEntry],
    config: &KpiConfig,
) -> Option<f64> {
    let metric = goal.kind.metric()?;
    if !config.is_enabled(metric) {
        return None;
    }

    let total = entries
        .iter()
        .filter(|e| e.date >= goal.start_date && e.date <= goal.end_date)
        .filter(|e| match goal.scope {
            GoalScope::Individual => e.seller_id == goal.seller_id,
            GoalScope::Collective => true,
        })
        .filter_map(|e| e.value(metric))
        .filter(|v| v.is_finite())
        .fold(0.0, add_f64);
    Some(total)
}

#[derive(Clone)]
pub struct ProgressTracker {
    repo: Arc<dyn GoalRepository>,
    clock: Arc<dyn Clock>,
}

impl ProgressTracker {
    pub fn new(repo: Arc<dyn GoalRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Replace a goal's current value
    ///
    /// Checked in order: acting role, value, closed goal, version.
    pub fn report_progress(
        &self,
        goal_id: i64,
        value: f64,
        actor_role: DataEntryRole,
        expected_version: Option<u64>,
    ) -> AppResult<GoalView> {
        let today = self.clock.today();

        let result = self.repo.modify(goal_id, &mut |goal| {
            if actor_role != goal.data_entry_responsible {
                return Err(AppError::with_message(
                    ErrorCode::ProgressRoleMismatch,
                    format!(
                        "Progress on this goal is entered by the {}",
                        goal.data_entry_responsible
                    ),
                )
                .with_detail("goal_id", goal.id)
                .with_detail("responsible", goal.data_entry_responsible.as_str()));
            }
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    "Progress value must be a non-negative number",
                )
                .with_detail("field", "value"));
            }
            if value > MAX_GOAL_VALUE {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    format!("Progress value must not exceed {}", MAX_GOAL_VALUE),
                )
                .with_detail("field", "value")
                .with_detail("max", MAX_GOAL_VALUE));
            }
            let status = effective_status(goal, today);
            if status.is_terminal() {
                return Err(AppError::conflict(
                    ErrorCode::GoalClosed,
                    format!("Goal {} is closed", goal.id),
                )
                .with_detail("status", serde_json::json!(status)));
            }
            check_version(goal, expected_version)?;

            goal.current_value = value;
            goal.status =
                evaluate_status(goal.current_value, goal.target_value, goal.end_date, today);
            Ok(())
        });

        match result {
            Ok(goal) => {
                tracing::info!(
                    goal_id,
                    value,
                    role = %actor_role,
                    status = ?goal.status,
                    "Progress reported"
                );
                Ok(build_view(&goal, today))
            }
            Err(e) => {
                tracing::warn!(goal_id, role = %actor_role, "Progress rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Persist terminal statuses for in-progress goals whose end has passed
    ///
    /// Returns the goals that were closed.
    pub fn close_expired(&self) -> Vec<GoalView> {
        let today = self.clock.today();
        let candidates: Vec<i64> = self
            .repo
            .find_all()
            .into_iter()
            .filter(|g| g.status == GoalStatus::InProgress && end_passed(g.end_date, today))
            .map(|g| g.id)
            .collect();

        let mut closed = Vec::new();
        for id in candidates {
            let result = self.repo.modify(id, &mut |goal| {
                if goal.status.is_terminal() {
                    return Err(AppError::conflict(ErrorCode::GoalClosed, "already closed"));
                }
                goal.status =
                    evaluate_status(goal.current_value, goal.target_value, goal.end_date, today);
                Ok(())
            });
            // goals closed or deleted concurrently are skipped
            if let Ok(goal) = result {
                closed.push(build_view(&goal, today));
            }
        }

        if !closed.is_empty() {
            tracing::info!(count = closed.len(), "Closed expired goals");
        }
        closed
    }
}
