//! Fyyur Library
//!
//! Venue and artist booking directory. Exposes modules for integration testing

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;
pub mod templates;
pub mod test_utils;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))

        // API routes (JSON)
        .nest("/api", handlers::api_routes())

        // HTML routes (Maud + HTMX)
        .merge(handlers::html_routes())

        // Static assets
        .nest_service("/static", ServeDir::new("static"))

        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
