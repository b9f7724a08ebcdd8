//! Seller API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{GoalFilter, GoalView, Seller};

use crate::core::ServerState;
use crate::goals::status::build_view;
use crate::goals::visible_goals_for_seller;
use crate::utils::AppResult;

/// PUT /api/sellers/:seller_id - record pushed by the account service
pub async fn upsert(
    State(state): State<ServerState>,
    Path(seller_id): Path<String>,
    Json(mut seller): Json<Seller>,
) -> AppResult<Json<Seller>> {
    seller.id = seller_id;
    Ok(Json(state.sellers.upsert(seller)?))
}

/// GET /api/sellers/:seller_id/goals - goals this seller may see
pub async fn visible_goals(
    State(state): State<ServerState>,
    Path(seller_id): Path<String>,
) -> AppResult<Json<Vec<GoalView>>> {
    let seller = state.sellers.get(&seller_id)?;
    let goals = state.goals.list_definitions(&GoalFilter {
        manager_id: Some(seller.manager_id.clone()),
        ..Default::default()
    });
    let today = state.clock.today();
    let views = visible_goals_for_seller(&seller, &goals)
        .into_iter()
        .map(|g| build_view(g, today))
        .collect();
    Ok(Json(views))
}
