//! API routes
//!
//! - [`health`] - health check
//! - [`kpi_config`] - tracked metrics and derived metrics
//! - [`goals`] - goal definitions and progress
//! - [`sellers`] - seller records and per-seller goal views

pub mod actor;
pub mod goals;
pub mod health;
pub mod kpi_config;
pub mod sellers;

use axum::Router;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub use actor::ActorRole;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(kpi_config::router())
        .merge(goals::router())
        .merge(sellers::router())
}

/// Build the application with middleware, used by the server and by tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        .layer(TraceLayer::new_for_http())
}
