//! POST /api/surface-temperature

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use metrics::{counter, histogram};
use surface_common::SurfaceError;
use surface_protocol::LayerRequest;

use super::error_response;
use crate::output::temperature_response;
use crate::pipeline::generate_temperature;
use crate::state::AppState;

const PRODUCT: &str = "temperature";

/// Gridded surface temperature from the newest clear thermal scene.
pub async fn surface_temperature_handler(
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

    let today = Utc::now().date_naive();
    let response = match generate_temperature(&state, &request, today).await {
        Ok(product) => Json(temperature_response(&product)).into_response(),
        Err(err) => error_response(PRODUCT, &err),
    };

    histogram!("surface_request_duration_seconds", "product" => PRODUCT)
        .record(start.elapsed().as_secs_f64());
    response
}
