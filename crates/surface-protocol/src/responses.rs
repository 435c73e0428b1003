//! Response bodies for the product endpoints and for errors.

use serde::{Deserialize, Serialize};
use surface_common::SurfaceError;

use crate::geojson::FeatureCollection;

/// Overall outcome of a product request that did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    /// Some part of the product is missing; see `warnings`.
    Partial,
}

/// Surface-layer product: sealed and unsealed polygons.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayerResponse {
    pub sealed_geojson: FeatureCollection,
    pub unsealed_geojson: FeatureCollection,
    pub status: ResponseStatus,
    pub sealed_count: usize,
    pub unsealed_count: usize,
    /// Features dropped for invalid geometry.
    #[serde(default)]
    pub dropped_features: usize,
    /// One entry per category whose source fetch failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Temperature product: gridded cells plus summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureResponse {
    pub temperature_data: FeatureCollection,
    pub min_temp: f64,
    pub max_temp: f64,
    pub mean_temp: f64,
    pub valid_cells: usize,
    pub status: ResponseStatus,
    /// Capture date of the selected scene, `YYYY-MM-DD`.
    pub image_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Exception response for errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExceptionResponse {
    /// Machine-readable error kind.
    #[serde(rename = "type")]
    pub type_: String,

    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// HTTP status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Detailed error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ExceptionResponse {
    /// Create a new exception response.
    pub fn new(type_: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            title: None,
            status: Some(status),
            detail: Some(detail.into()),
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl From<&SurfaceError> for ExceptionResponse {
    fn from(err: &SurfaceError) -> Self {
        let status = err.http_status_code();
        let title = match status {
            400 => "Bad Request",
            404 => "No Data",
            422 => "Unprocessable Geometry",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Internal Server Error",
        };
        Self::new(err.code(), status, err.to_string()).with_title(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_response_field_names() {
        let response = LayerResponse {
            sealed_geojson: FeatureCollection::new(),
            unsealed_geojson: FeatureCollection::new(),
            status: ResponseStatus::Partial,
            sealed_count: 0,
            unsealed_count: 0,
            dropped_features: 0,
            warnings: vec!["unsealed fetch failed".to_string()],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "partial");
        assert_eq!(json["sealed_geojson"]["type"], "FeatureCollection");
        assert_eq!(json["sealed_count"], 0);
        assert_eq!(json["warnings"][0], "unsealed fetch failed");
    }

    #[test]
    fn test_warnings_omitted_when_empty() {
        let response = LayerResponse {
            sealed_geojson: FeatureCollection::new(),
            unsealed_geojson: FeatureCollection::new(),
            status: ResponseStatus::Success,
            sealed_count: 0,
            unsealed_count: 0,
            dropped_features: 0,
            warnings: Vec::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("warnings").is_none());
    }

    #[test]
    fn test_exception_from_surface_error() {
        let err = SurfaceError::no_data("no scene under 20% cloud cover");
        let exception = ExceptionResponse::from(&err);
        assert_eq!(exception.type_, "NoDataError");
        assert_eq!(exception.status, Some(404));
        assert!(exception.detail.unwrap().contains("20% cloud cover"));
    }
}
