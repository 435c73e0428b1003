//! Surface Layers API Service Library
//!
//! HTTP service producing sealed/unsealed land-cover layers from a vector
//! feature source and gridded land surface temperature from thermal
//! satellite imagery, both for a square area around a point.

pub mod config;
pub mod handlers;
pub mod output;
pub mod pipeline;
pub mod sources;
pub mod state;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::CorsConfig;
use crate::state::AppState;

/// Build the service router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        // Products
        .route(
            "/api/generate-layers",
            post(handlers::layers::generate_layers_handler),
        )
        .route(
            "/api/surface-temperature",
            post(handlers::temperature::surface_temperature_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Any origin when the list holds `*`, otherwise exactly the listed ones.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
