//! Route configuration.

use crate::api::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;

/// Creates the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Market data
        .route("/price", get(handlers::get_price))
        // Trading
        .route("/trade", post(handlers::place_trade))
        .route("/portfolio", get(handlers::get_portfolio))
        // News
        .route("/sentiment", get(handlers::get_sentiment))
        .with_state(state)
}
