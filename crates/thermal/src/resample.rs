//! Per-cell aggregation of raw thermal samples.

use tracing::debug;

use crate::calibration::BandCalibration;
use crate::grid::{GridSpec, TemperatureGrid};
use crate::scene::ThermalSample;

/// Average the valid samples of each cell and convert to Celsius.
///
/// Samples are valid unless cloud-masked or equal to the band fill value.
/// The mean is taken over digital numbers and calibrated once per cell.
/// Cells with no valid sample stay invalid; nothing is interpolated.
pub fn resample(
    spec: GridSpec,
    samples: &[ThermalSample],
    calibration: &BandCalibration,
) -> TemperatureGrid {
    let mut sums = vec![0.0_f64; spec.len()];
    let mut counts = vec![0_usize; spec.len()];
    let mut outside = 0_usize;
    let mut rejected = 0_usize;

    for sample in samples {
        if sample.cloud_masked || calibration.is_fill(sample.digital_number) {
            rejected += 1;
            continue;
        }
        let Some((row, col)) = spec.locate(sample.lon, sample.lat) else {
            outside += 1;
            continue;
        };
        let idx = spec.flat_index(row, col);
        sums[idx] += f64::from(sample.digital_number);
        counts[idx] += 1;
    }

    let mut grid = TemperatureGrid::empty(spec);
    for (idx, cell) in grid.cells_mut().iter_mut().enumerate() {
        let count = counts[idx];
        if count == 0 {
            continue;
        }
        let mean_dn = sums[idx] / count as f64;
        cell.temperature_celsius = Some(calibration.to_celsius(mean_dn));
        cell.valid_sample_count = count;
    }

    debug!(
        samples = samples.len(),
        rejected,
        outside,
        cells = spec.len(),
        valid_cells = grid.valid_count(),
        "Resampled thermal samples"
    );

    grid
}
