pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod llm;
pub mod maps;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

use crate::error::ApiError;
use crate::state::AppState;

async fn fallback_handler() -> ApiError {
    ApiError::NotFound
}

// Builds the full router. Kept out of main so integration tests can drive
// the gateway in-process with a stub generation backend.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/places",
            post(handlers::places_handler).options(handlers::places_preflight),
        )
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .fallback(fallback_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
