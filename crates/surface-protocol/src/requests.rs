//! Request body shared by both product endpoints.

use serde::{Deserialize, Serialize};
use surface_common::{SurfaceError, SurfaceResult};

/// A square area of interest: center point plus side length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerRequest {
    pub lat: f64,
    pub lon: f64,
    pub size_km: f64,
}

/// Accepted range of `size_km` at the HTTP edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeLimits {
    #[serde(default = "default_min_size_km")]
    pub min_size_km: f64,
    #[serde(default = "default_max_size_km")]
    pub max_size_km: f64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_size_km: default_min_size_km(),
            max_size_km: default_max_size_km(),
        }
    }
}

fn default_min_size_km() -> f64 {
    0.5
}

fn default_max_size_km() -> f64 {
    10.0
}

impl LayerRequest {
    pub fn new(lat: f64, lon: f64, size_km: f64) -> Self {
        Self { lat, lon, size_km }
    }

    /// Check coordinate ranges and the configured size window.
    ///
    /// The bbox calculation applies its own, stricter latitude rule on top.
    pub fn validate(&self, limits: &SizeLimits) -> SurfaceResult<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(SurfaceError::invalid_request(format!(
                "lat must be within [-90, 90], got {}",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(SurfaceError::invalid_request(format!(
                "lon must be within [-180, 180], got {}",
                self.lon
            )));
        }
        if !(limits.min_size_km..=limits.max_size_km).contains(&self.size_km) {
            return Err(SurfaceError::invalid_request(format!(
                "size_km must be within [{}, {}], got {}",
                limits.min_size_km, limits.max_size_km, self.size_km
            )));
        }
        Ok(())
    }
}
