// Library crate for API Hub
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::handlers::{
    create_api, get_api, get_dashboard, health_check, list_apis, list_categories,
};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        // Catalog routes
        .route("/api/apis", get(list_apis).post(create_api))
        .route("/api/apis/{id}", get(get_api))
        .route("/api/categories", get(list_categories))
        .route("/api/dashboard", get(get_dashboard))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// CORS policy for the browser front-end
fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    match config.cors_allowed_origin.as_deref() {
        None => base.allow_origin(Any),
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => base.allow_origin(origin),
            Err(_) => {
                tracing::warn!(
                    origin,
                    "Ignoring invalid CORS_ALLOWED_ORIGIN, cross-origin requests disabled"
                );
                base
            }
        },
    }
}
