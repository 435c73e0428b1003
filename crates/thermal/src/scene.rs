//! Scene metadata and raw thermal samples.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surface_common::BoundingBox;

/// Query sent to the imagery source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneQuery {
    pub bbox: BoundingBox,
    pub band: String,
    /// Inclusive capture-date window.
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub max_cloud_cover: f64,
}

/// A candidate scene intersecting the bbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCandidate {
    pub id: String,
    pub capture_date: NaiveDate,
    /// Percentage of the scene under cloud, 0 to 100.
    pub cloud_cover_percent: f64,
    /// Position in the source's ingestion order; higher is more recent.
    #[serde(default)]
    pub ingestion_seq: u64,
}

/// One raw pixel sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalSample {
    pub lon: f64,
    pub lat: f64,
    pub digital_number: u16,
    /// Set by the source's QA mask for cloud or cloud-shadow pixels.
    #[serde(default)]
    pub cloud_masked: bool,
}

impl ThermalSample {
    pub fn new(lon: f64, lat: f64, digital_number: u16) -> Self {
        Self {
            lon,
            lat,
            digital_number,
            cloud_masked: false,
        }
    }

    pub fn masked(mut self) -> Self {
        self.cloud_masked = true;
        self
    }
}

/// The selected scene with its samples over the bbox.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalCandidateImage {
    pub scene: SceneCandidate,
    pub samples: Vec<ThermalSample>,
}

impl ThermalCandidateImage {
    /// Capture date as an ISO `YYYY-MM-DD` string.
    pub fn image_date(&self) -> String {
        self.scene.capture_date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_deserialization_defaults() {
        let json = r#"{"id": "LC09_L2SP_196024_20240704", "capture_date": "2024-07-04", "cloud_cover_percent": 3.5}"#;
        let scene: SceneCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(scene.capture_date, NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
        assert_eq!(scene.ingestion_seq, 0);
    }

    #[test]
    fn test_image_date_format() {
        let image = ThermalCandidateImage {
            scene: SceneCandidate {
                id: "a".to_string(),
                capture_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                cloud_cover_percent: 0.0,
                ingestion_seq: 0,
            },
            samples: vec![],
        };
        assert_eq!(image.image_date(), "2024-03-09");
    }
}
