//! Request pipelines for the two products.
//!
//! Each pipeline validates the request, derives the bbox and drives the
//! collaborators under per-call timeouts. Output shaping lives in
//! [`crate::output`].

pub mod surface;
pub mod temperature;

use std::future::Future;
use std::time::Duration;

use surface_common::{BoundingBox, SurfaceError, SurfaceResult};
use surface_protocol::{LayerRequest, SizeLimits};

pub use surface::generate_layers;
pub use temperature::{generate_temperature, TemperatureProduct};

/// Await `call`, failing with `DataSourceTimeout` once `budget` elapses.
///
/// The inner future is dropped on timeout, which cancels its I/O.
pub async fn with_timeout<T, F>(budget: Duration, what: &str, call: F) -> SurfaceResult<T>
where
    F: Future<Output = SurfaceResult<T>>,
{
    match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => Err(SurfaceError::timeout(format!(
            "{} did not answer within {:.1}s",
            what,
            budget.as_secs_f64()
        ))),
    }
}

/// Validate a request and derive its bbox.
pub fn request_bbox(request: &LayerRequest, limits: &SizeLimits) -> SurfaceResult<BoundingBox> {
    request.validate(limits)?;
    BoundingBox::from_center(request.lat, request.lon, request.size_km)
}
