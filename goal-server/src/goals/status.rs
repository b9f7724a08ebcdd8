//! Goal status evaluation and progress annotations
//!
//! Status is a pure function of `(current, target, end_date, today)`. Stored
//! terminal statuses win over evaluation so a closed goal stays closed.

use chrono::NaiveDate;
use shared::models::{GoalDefinition, GoalStatus, GoalView};

use crate::metrics::sub_f64;
use crate::utils::time::end_passed;

/// Status at `today`
pub fn evaluate_status(
    current_value: f64,
    target_value: f64,
    end_date: NaiveDate,
    today: NaiveDate,
) -> GoalStatus {
    if !end_passed(end_date, today) {
        GoalStatus::InProgress
    } else if current_value >= target_value {
        GoalStatus::Achieved
    } else {
        GoalStatus::Failed
    }
}

/// Status as displayed: stored terminal status, otherwise evaluated
pub fn effective_status(goal: &GoalDefinition, today: NaiveDate) -> GoalStatus {
    if goal.status.is_terminal() {
        goal.status
    } else {
        evaluate_status(goal.current_value, goal.target_value, goal.end_date, today)
    }
}

/// `min(round(current / target * 100), 100)`
pub fn percent_complete(current_value: f64, target_value: f64) -> u32 {
    if target_value.is_nan() || target_value <= 0.0 || !current_value.is_finite() {
        return 0;
    }
    let pct = (current_value / target_value * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// `max(current - target, 0)`
pub fn exceeded_by(current_value: f64, target_value: f64) -> f64 {
    if !current_value.is_finite() || !target_value.is_finite() || current_value <= target_value {
        return 0.0;
    }
    sub_f64(current_value, target_value).max(0.0)
}

/// Render a goal with its effective status and progress annotations
pub fn build_view(goal: &GoalDefinition, today: NaiveDate) -> GoalView {
    let mut goal = goal.clone();
    goal.status = effective_status(&goal, today);
    GoalView {
        percent_complete: percent_complete(goal.current_value, goal.target_value),
        exceeded_by: exceeded_by(goal.current_value, goal.target_value),
        goal,
    }
}
