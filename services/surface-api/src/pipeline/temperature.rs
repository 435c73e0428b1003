//! Gridded land surface temperature.

use chrono::NaiveDate;
use surface_common::{SurfaceError, SurfaceResult};
use surface_protocol::LayerRequest;
use thermal::{
    compute_stats, resample, select_scene, GridSpec, GridStats, TemperatureGrid,
    ThermalCandidateImage,
};
use tracing::{debug, info};

use super::{request_bbox, with_timeout};
use crate::state::AppState;

/// The selected image, its resampled grid and the grid statistics.
#[derive(Debug, Clone)]
pub struct TemperatureProduct {
    pub image: ThermalCandidateImage,
    pub grid: TemperatureGrid,
    pub stats: GridStats,
}

/// Select a scene, fetch its samples and grid them.
///
/// `today` anchors the lookback window. Fails with `NoData` when no scene
/// clears the cloud ceiling or no grid cell ends up valid.
pub async fn generate_temperature(
    state: &AppState,
    request: &LayerRequest,
    today: NaiveDate,
) -> SurfaceResult<TemperatureProduct> {
    let bbox = request_bbox(request, &state.config.limits)?;

    let imagery = &state.config.imagery;
    let calibration = imagery.calibration().ok_or_else(|| {
        SurfaceError::Internal(format!("no calibration for band {}", imagery.band))
    })?;
    let budget = imagery.timeout();

    let policy = state.config.thermal.selection_policy();
    let query = policy.query(bbox, &imagery.band, today);

    let candidates =
        with_timeout(budget, "scene search", state.imagery_source.search(&query)).await?;
    debug!(candidates = candidates.len(), "Scene candidates");

    let scene = select_scene(&candidates, &policy, today)?;

    let samples = with_timeout(
        budget,
        "scene samples",
        state.imagery_source.samples(&scene, &bbox, &imagery.band),
    )
    .await?;

    let spec = GridSpec::new(bbox, state.config.thermal.cell_size_m)?;
    let grid = resample(spec, &samples, &calibration);
    let stats = compute_stats(grid.cells())?;

    let image = ThermalCandidateImage { scene, samples };
    info!(
        scene = %image.scene.id,
        image_date = %image.image_date(),
        cells = grid.cells().len(),
        valid_cells = stats.valid_cell_count,
        "Generated temperature grid"
    );

    Ok(TemperatureProduct { image, grid, stats })
}
