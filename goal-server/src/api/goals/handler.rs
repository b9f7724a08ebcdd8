//! Goal API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use shared::models::{GoalCreate, GoalFilter, GoalUpdate, GoalView, KpiEntry, ProgressReport};

use crate::api::ActorRole;
use crate::core::ServerState;
use crate::goals::progress_from_entries;
use crate::utils::AppResult;

/// GET /api/goals - filter by manager_id, family, scope, visible
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<GoalFilter>,
) -> AppResult<Json<Vec<GoalView>>> {
    Ok(Json(state.goals.list(&filter)))
}

/// GET /api/goals/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<GoalView>> {
    Ok(Json(state.goals.get(id)?))
}

/// POST /api/goals
pub async fn create(
    State(state): State<ServerState>,
    actor: ActorRole,
    Json(payload): Json<GoalCreate>,
) -> AppResult<Json<GoalView>> {
    actor.require_manager()?;
    let config = state.kpi_configs.get_or_default(&payload.manager_id);
    let view = state
        .goals
        .create(&payload.manager_id, &payload.input, &config)?;
    Ok(Json(view))
}

/// PUT /api/goals/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: ActorRole,
    Json(payload): Json<GoalUpdate>,
) -> AppResult<Json<GoalView>> {
    actor.require_manager()?;
    let existing = state.goals.find(id)?;
    let config = state.kpi_configs.get_or_default(&existing.manager_id);
    let view = state
        .goals
        .update(id, &payload.input, &config, payload.expected_version)?;
    Ok(Json(view))
}

/// DELETE /api/goals/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    actor: ActorRole,
) -> AppResult<Json<bool>> {
    actor.require_manager()?;
    state.goals.delete(id)?;
    Ok(Json(true))
}

/// POST /api/goals/:id/progress
pub async fn report_progress(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ActorRole(role): ActorRole,
    Json(payload): Json<ProgressReport>,
) -> AppResult<Json<GoalView>> {
    let view = state
        .tracker
        .report_progress(id, payload.value, role, payload.expected_version)?;
    Ok(Json(view))
}

#[derive(Debug, Serialize)]
pub struct ProgressSuggestion {
    pub goal_id: i64,
    /// `None` when the goal is not a tracked KPI goal
    pub suggested_value: Option<f64>,
}

/// POST /api/goals/:id/progress/suggest - current value computed from a feed
pub async fn suggest_progress(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(entries): Json<Vec<KpiEntry>>,
) -> AppResult<Json<ProgressSuggestion>> {
    let goal = state.goals.find(id)?;
    let config = state.kpi_configs.get_or_default(&goal.manager_id);
    Ok(Json(ProgressSuggestion {
        goal_id: id,
        suggested_value: progress_from_entries(&goal, &entries, &config),
    }))
}

/// POST /api/goals/close-expired
pub async fn close_expired(
    State(state): State<ServerState>,
    actor: ActorRole,
) -> AppResult<Json<Vec<GoalView>>> {
    actor.require_manager()?;
    Ok(Json(state.tracker.close_expired()))
}
