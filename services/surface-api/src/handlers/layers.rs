//! POST /api/generate-layers

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::{IntoResponse, Response},
    Json,
};
use metrics::{counter, histogram};
use surface_common::SurfaceError;
use surface_protocol::LayerRequest;

use super::error_response;
use crate::output::layer_response;
use crate::pipeline::generate_layers;
use crate::state::AppState;

const PRODUCT: &str = "layers";

/// Sealed and unsealed feature collections for a square area.
pub async fn generate_layers_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<LayerRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    counter!("surface_requests_total", "product" => PRODUCT).increment(1);

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            let err = SurfaceError::invalid_request(rejection.body_text());
            return error_response(PRODUCT, &err);
        }
    };

    let response = match generate_layers(&state, &request).await {
        Ok(layers) => {
            let response = layer_response(&layers);
            counter!("surface_features_total", "category" => "sealed")
                .increment(response.sealed_count as u64);
            counter!("surface_features_total", "category" => "unsealed")
                .increment(response.unsealed_count as u64);
            Json(response).into_response()
        }
        Err(err) => error_response(PRODUCT, &err),
    };

    histogram!("surface_request_duration_seconds", "product" => PRODUCT)
        .record(start.elapsed().as_secs_f64());
    response
}
