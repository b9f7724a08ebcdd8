//! KPI Config API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{
    DerivedMetricValue, KpiConfig, KpiConfigReplace, KpiEntry, KpiToggleUpdate, RawValues,
};

use crate::api::ActorRole;
use crate::core::ServerState;
use crate::metrics::compute_derived;
use crate::utils::AppResult;

/// GET /api/kpi-config/:manager_id
pub async fn get(
    State(state): State<ServerState>,
    Path(manager_id): Path<String>,
) -> AppResult<Json<KpiConfig>> {
    Ok(Json(state.kpi_configs.get_config(&manager_id)?))
}

/// PUT /api/kpi-config/:manager_id - whole-map overwrite
pub async fn replace(
    State(state): State<ServerState>,
    Path(manager_id): Path<String>,
    actor: ActorRole,
    Json(payload): Json<KpiConfigReplace>,
) -> AppResult<Json<KpiConfig>> {
    actor.require_manager()?;
    let config = state
        .kpi_configs
        .replace_config(&manager_id, payload.raw_metric_toggle)?;
    Ok(Json(config))
}

/// PUT /api/kpi-config/:manager_id/toggle
pub async fn toggle(
    State(state): State<ServerState>,
    Path(manager_id): Path<String>,
    actor: ActorRole,
    Json(payload): Json<KpiToggleUpdate>,
) -> AppResult<Json<KpiConfig>> {
    actor.require_manager()?;
    let config = state.kpi_configs.set_toggle(
        &manager_id,
        payload.metric,
        payload.role,
        payload.enabled,
    )?;
    Ok(Json(config))
}

/// POST /api/kpi-config/:manager_id/derived - ratios over given raw totals
pub async fn derived(
    State(state): State<ServerState>,
    Path(manager_id): Path<String>,
    Json(raw): Json<RawValues>,
) -> AppResult<Json<Vec<DerivedMetricValue>>> {
    let config = state.kpi_configs.get_or_default(&manager_id);
    Ok(Json(compute_derived(&raw, &config)))
}

/// POST /api/kpi-config/:manager_id/derived/from-entries - ratios over a feed
pub async fn derived_from_entries(
    State(state): State<ServerState>,
    Path(manager_id): Path<String>,
    Json(entries): Json<Vec<KpiEntry>>,
) -> AppResult<Json<Vec<DerivedMetricValue>>> {
    let config = state.kpi_configs.get_or_default(&manager_id);
    let raw = RawValues::from_entries(&entries, &config);
    Ok(Json(compute_derived(&raw, &config)))
}
