//! KPI config API

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kpi-config", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{manager_id}", get(handler::get).put(handler::replace))
        .route("/{manager_id}/toggle", put(handler::toggle))
        .route("/{manager_id}/derived", post(handler::derived))
        .route(
            "/{manager_id}/derived/from-entries",
            post(handler::derived_from_entries),
        )
}
