//! Sealed/unsealed land-cover layers.

use landcover::{assemble, fetch_filters, AssembledLayers, SurfaceCategory};
use surface_common::SurfaceResult;
use surface_protocol::LayerRequest;
use tracing::info;

use super::{request_bbox, with_timeout};
use crate::state::AppState;

/// Fetch both candidate sets concurrently, then classify and partition.
///
/// The two queries have independent timeouts; one failing yields a
/// partial result, both failing fails the request.
pub async fn generate_layers(
    state: &AppState,
    request: &LayerRequest,
) -> SurfaceResult<AssembledLayers> {
    let bbox = request_bbox(request, &state.config.limits)?;
    let budget = state.config.overpass.timeout();

    let sealed_filters = fetch_filters(SurfaceCategory::Sealed);
    let unsealed_filters = fetch_filters(SurfaceCategory::Unsealed);

    let (sealed_fetch, unsealed_fetch) = tokio::join!(
        with_timeout(
            budget,
            "sealed feature query",
            state.vector_source.fetch(&bbox, &sealed_filters)
        ),
        with_timeout(
            budget,
            "unsealed feature query",
            state.vector_source.fetch(&bbox, &unsealed_filters)
        ),
    );

    let layers = assemble(sealed_fetch, unsealed_fetch)?;

    info!(
        sealed = layers.sealed_count(),
        unsealed = layers.unsealed_count(),
        dropped = layers.dropped.len(),
        partial = layers.is_partial(),
        "Generated surface layers"
    );

    Ok(layers)
}
