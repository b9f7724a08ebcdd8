//! Seller API

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sellers", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{seller_id}", put(handler::upsert))
        .route("/{seller_id}/goals", get(handler::visible_goals))
}
