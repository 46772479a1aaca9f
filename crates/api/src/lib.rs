//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Input-boundary validation for appraisal requests
//! - Response formatting (string figures, chart aggregates)

pub mod routes;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use weilao_core::appraisal::AppraisalEngine;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The appraisal engine. Stateless and `Copy`, so handlers may run it
    /// concurrently with no coordination.
    pub engine: AppraisalEngine,
}

impl AppState {
    /// Creates the application state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: AppraisalEngine::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
