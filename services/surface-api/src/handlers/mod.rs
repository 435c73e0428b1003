//! HTTP request handlers for the surface API.

pub mod health;
pub mod layers;
pub mod temperature;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use surface_common::SurfaceError;
use surface_protocol::ExceptionResponse;
use tracing::{error, warn};

/// Render an error as a JSON exception body with its HTTP status, and
/// count it against `product`.
pub(crate) fn error_response(product: &'static str, err: &SurfaceError) -> Response {
    counter!("surface_request_errors_total", "product" => product, "code" => err.code())
        .increment(1);

    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(product, code = err.code(), error = %err, "Request failed");
    } else {
        warn!(product, code = err.code(), error = %err, "Request rejected");
    }

    (status, Json(ExceptionResponse::from(err))).into_response()
}
