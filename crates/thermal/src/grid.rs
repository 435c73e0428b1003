//! Fixed-size ground-cell tiling of a bounding box.
//!
//! Cells are addressed by `(row, col)` with row 0 along the northern edge
//! and col 0 along the western edge, stored row-major in a flat array. The
//! last row and column are trimmed so no cell extends past the bbox.

use serde::{Deserialize, Serialize};
use surface_common::bbox::meters_per_degree_lon;
use surface_common::{BoundingBox, SurfaceError, SurfaceResult, METERS_PER_DEGREE};

/// Ratios within this distance above an integer do not open a sliver cell.
const CELL_COUNT_TOLERANCE: f64 = 1e-9;

/// Grid geometry for one bbox and cell size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub bbox: BoundingBox,
    /// Cell edge length in ground meters.
    pub cell_size_m: f64,
    pub rows: usize,
    pub cols: usize,
    /// Cell edge in degrees latitude.
    pub cell_dlat: f64,
    /// Cell edge in degrees longitude at the bbox center latitude.
    pub cell_dlon: f64,
}

impl GridSpec {
    pub fn new(bbox: BoundingBox, cell_size_m: f64) -> SurfaceResult<Self> {
        if !cell_size_m.is_finite() || cell_size_m <= 0.0 {
            return Err(SurfaceError::invalid_request(format!(
                "cell size must be positive, got {}",
                cell_size_m
            )));
        }

        let (center_lat, _) = bbox.center();
        Ok(Self {
            bbox,
            cell_size_m,
            rows: cells_along(bbox.height_m(), cell_size_m),
            cols: cells_along(bbox.width_m(), cell_size_m),
            cell_dlat: cell_size_m / METERS_PER_DEGREE,
            cell_dlon: cell_size_m / meters_per_degree_lon(center_lat),
        })
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Row-major index of a cell.
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// `[west, south, east, north]` of a cell, clamped to the bbox.
    pub fn cell_bounds(&self, row: usize, col: usize) -> [f64; 4] {
        let b = &self.bbox;

        let west = b.min_lon + col as f64 * self.cell_dlon;
        let east = if col + 1 >= self.cols {
            b.max_lon
        } else {
            (b.min_lon + (col + 1) as f64 * self.cell_dlon).min(b.max_lon)
        };

        let north = b.max_lat - row as f64 * self.cell_dlat;
        let south = if row + 1 >= self.rows {
            b.min_lat
        } else {
            (b.max_lat - (row + 1) as f64 * self.cell_dlat).max(b.min_lat)
        };

        [west, south, east, north]
    }

    /// Cell containing a point, or `None` outside the bbox.
    ///
    /// Points on an interior edge belong to the cell east/south of it.
    pub fn locate(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        if self.is_empty() || !self.bbox.contains_point(lon, lat) {
            return None;
        }

        let col = ((lon - self.bbox.min_lon) / self.cell_dlon).floor() as usize;
        let row = ((self.bbox.max_lat - lat) / self.cell_dlat).floor() as usize;
        Some((row.min(self.rows - 1), col.min(self.cols - 1)))
    }
}

/// Number of cells of `cell_m` needed to cover `extent_m`.
pub fn cells_along(extent_m: f64, cell_m: f64) -> usize {
    let ratio = extent_m / cell_m;
    (ratio - CELL_COUNT_TOLERANCE).ceil().max(1.0) as usize
}

/// One grid cell after resampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    /// `[west, south, east, north]`.
    pub bounds: [f64; 4],
    /// `None` when no valid sample fell in the cell.
    pub temperature_celsius: Option<f64>,
    pub valid_sample_count: usize,
}

impl GridCell {
    pub fn is_valid(&self) -> bool {
        self.temperature_celsius.is_some()
    }
}

/// The full, fixed-size cell array for one bbox.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureGrid {
    pub spec: GridSpec,
    cells: Vec<GridCell>,
}

impl TemperatureGrid {
    /// Every cell of the spec, all invalid.
    pub fn empty(spec: GridSpec) -> Self {
        let mut cells = Vec::with_capacity(spec.len());
        for row in 0..spec.rows {
            for col in 0..spec.cols {
                cells.push(GridCell {
                    row,
                    col,
                    bounds: spec.cell_bounds(row, col),
                    temperature_celsius: None,
                    valid_sample_count: 0,
                });
            }
        }
        Self { spec, cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row >= self.spec.rows || col >= self.spec.cols {
            return None;
        }
        self.cells.get(self.spec.flat_index(row, col))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [GridCell] {
        &mut self.cells
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn valid_cells(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|c| c.is_valid())
    }

    pub fn valid_count(&self) -> usize {
        self.valid_cells().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_along_exact_multiple() {
        assert_eq!(cells_along(2000.0, 50.0), 40);
        assert_eq!(cells_along(2000.0000000001, 50.0), 40);
        assert_eq!(cells_along(2010.0, 50.0), 41);
        assert_eq!(cells_along(10.0, 50.0), 1);
    }

    #[test]
    fn test_two_km_grid_dimensions() {
        let bbox = BoundingBox::from_center(51.1787, 6.8416, 2.0).unwrap();
        let spec = GridSpec::new(bbox, 50.0).unwrap();
        assert_eq!(spec.rows, 40);
        assert_eq!(spec.cols, 40);
        assert_eq!(spec.len(), 1600);
    }

    #[test]
    fn test_last_cells_clamped_to_bbox() {
        let bbox = BoundingBox::from_center(0.0, 0.0, 1.03).unwrap();
        let spec = GridSpec::new(bbox, 50.0).unwrap();
        assert_eq!(spec.cols, 21);
        let [_, south, east, _] = spec.cell_bounds(spec.rows - 1, spec.cols - 1);
        assert_eq!(east, bbox.max_lon);
        assert_eq!(south, bbox.min_lat);
    }

    #[test]
    fn test_locate_edges() {
        let bbox = BoundingBox::from_center(10.0, 10.0, 1.0).unwrap();
        let spec = GridSpec::new(bbox, 100.0).unwrap();
        assert_eq!(spec.locate(bbox.min_lon, bbox.max_lat), Some((0, 0)));
        assert_eq!(
            spec.locate(bbox.max_lon, bbox.min_lat),
            Some((spec.rows - 1, spec.cols - 1))
        );
        assert_eq!(spec.locate(bbox.max_lon + 1e-6, bbox.min_lat), None);
    }

    #[test]
    fn test_rejects_bad_cell_size() {
        let bbox = BoundingBox::from_center(10.0, 10.0, 1.0).unwrap();
        assert!(GridSpec::new(bbox, 0.0).is_err());
        assert!(GridSpec::new(bbox, -5.0).is_err());
    }
}
