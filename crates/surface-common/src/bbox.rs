//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::{SurfaceError, SurfaceResult};

/// Ground distance of one degree of latitude, in meters.
///
/// Also the length of one degree of longitude at the equator. Every
/// degree/meter conversion in the workspace goes through this constant so
/// the bbox and the temperature grid agree on scale.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Latitude limit beyond which longitude scaling is rejected.
pub const MAX_ABS_CENTER_LAT: f64 = 89.9;

/// A geographic bounding box in WGS84 degrees.
///
/// Invariant: `min_lat < max_lat` and `min_lon < max_lon`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> SurfaceResult<Self> {
        let finite = [min_lat, min_lon, max_lat, max_lon]
            .iter()
            .all(|v| v.is_finite());
        if !finite || min_lat >= max_lat || min_lon >= max_lon {
            return Err(SurfaceError::invalid_request(format!(
                "degenerate bounding box ({}, {}, {}, {})",
                min_lat, min_lon, max_lat, max_lon
            )));
        }

        Ok(Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        })
    }

    /// Build a square box of `size_km` side length centered on a point.
    ///
    /// Equirectangular approximation: the latitude half-side is
    /// `size_m / 2 / 111320`, the longitude half-side is scaled by
    /// `1 / cos(center_lat)`. No geodesic correction is applied.
    pub fn from_center(center_lat: f64, center_lon: f64, size_km: f64) -> SurfaceResult<Self> {
        if !center_lat.is_finite() || center_lat.abs() >= MAX_ABS_CENTER_LAT {
            return Err(SurfaceError::invalid_request(format!(
                "latitude {} outside (-{max}, {max})",
                center_lat,
                max = MAX_ABS_CENTER_LAT
            )));
        }
        if !center_lon.is_finite() || center_lon.abs() >= 180.0 {
            return Err(SurfaceError::invalid_request(format!(
                "longitude {} outside (-180, 180)",
                center_lon
            )));
        }
        if !size_km.is_finite() || size_km <= 0.0 {
            return Err(SurfaceError::invalid_request(format!(
                "size_km must be positive, got {}",
                size_km
            )));
        }

        let half_side_m = size_km * 1000.0 / 2.0;
        let lat_offset = half_side_m / METERS_PER_DEGREE;
        let lon_offset = half_side_m / meters_per_degree_lon(center_lat);

        Self::new(
            center_lat - lat_offset,
            center_lon - lon_offset,
            center_lat + lat_offset,
            center_lon + lon_offset,
        )
    }

    /// Center point as `(lat, lon)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Longitude extent in degrees.
    pub fn width_deg(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude extent in degrees.
    pub fn height_deg(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// East-west ground extent in meters, measured at the center latitude.
    pub fn width_m(&self) -> f64 {
        self.width_deg() * meters_per_degree_lon(self.center().0)
    }

    /// North-south ground extent in meters.
    pub fn height_m(&self) -> f64 {
        self.height_deg() * METERS_PER_DEGREE
    }

    /// Check if a point is inside the box (edges inclusive).
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// `[west, south, east, north]`, the order most imagery APIs expect.
    pub fn to_wsen(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }

    /// `south,west,north,east`, the order Overpass QL bbox filters expect.
    pub fn to_overpass_string(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

/// Ground length of one degree of longitude at the given latitude.
pub fn meters_per_degree_lon(lat: f64) -> f64 {
    METERS_PER_DEGREE * lat.to_radians().cos()
}
