//! Summary statistics over valid grid cells.

use serde::{Deserialize, Serialize};
use surface_common::{SurfaceError, SurfaceResult};

use crate::grid::GridCell;

/// Unrounded min/max/mean of cell temperatures, degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub valid_cell_count: usize,
}

/// Compute statistics over the valid cells among `cells`.
///
/// Invalid cells are skipped. Fails with `NoData` when none are valid.
pub fn compute_stats<'a>(
    cells: impl IntoIterator<Item = &'a GridCell>,
) -> SurfaceResult<GridStats> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    let mut count = 0_usize;

    for t in cells.into_iter().filter_map(|c| c.temperature_celsius) {
        min = min.min(t);
        max = max.max(t);
        sum += t;
        count += 1;
    }

    if count == 0 {
        return Err(SurfaceError::no_data("no valid grid cells in area"));
    }

    // Summation error can push the mean a hair outside [min, max].
    let mean = (sum / count as f64).clamp(min, max);

    Ok(GridStats {
        min,
        max,
        mean,
        valid_cell_count: count,
    })
}
