//! Scene selection under cloud-cover and time-window constraints.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use surface_common::{BoundingBox, SurfaceError, SurfaceResult};
use tracing::debug;

use crate::scene::{SceneCandidate, SceneQuery};

/// Lookback window and cloud ceiling for scene selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    #[serde(default = "default_lookback_months")]
    pub lookback_months: u32,
    /// Inclusive ceiling, percent.
    #[serde(default = "default_max_cloud_cover")]
    pub max_cloud_cover: f64,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            lookback_months: default_lookback_months(),
            max_cloud_cover: default_max_cloud_cover(),
        }
    }
}

fn default_lookback_months() -> u32 {
    6
}

fn default_max_cloud_cover() -> f64 {
    20.0
}

impl SelectionPolicy {
    /// Inclusive `(start, end)` capture-date window ending `today`.
    pub fn window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = today
            .checked_sub_months(Months::new(self.lookback_months))
            .unwrap_or(NaiveDate::MIN);
        (start, today)
    }

    /// Build the source query for a bbox and band.
    pub fn query(&self, bbox: BoundingBox, band: &str, today: NaiveDate) -> SceneQuery {
        let (start, end) = self.window(today);
        SceneQuery {
            bbox,
            band: band.to_string(),
            start,
            end,
            max_cloud_cover: self.max_cloud_cover,
        }
    }

    fn accepts_cloud_cover(&self, cloud_cover: f64) -> bool {
        (0.0..=100.0).contains(&cloud_cover) && cloud_cover <= self.max_cloud_cover
    }
}

/// Pick the scene to use.
///
/// Candidates are scanned newest capture date first, ties broken by the
/// most recent ingestion; the first one inside the window and under the
/// cloud ceiling wins. The ceiling is never relaxed: if nothing qualifies
/// the result is `NoData`.
pub fn select_scene(
    candidates: &[SceneCandidate],
    policy: &SelectionPolicy,
    today: NaiveDate,
) -> SurfaceResult<SceneCandidate> {
    let (start, end) = policy.window(today);

    let mut ordered: Vec<&SceneCandidate> = candidates.iter().collect();
    ordered.sort_by(|a, b| {
        b.capture_date
            .cmp(&a.capture_date)
            .then(b.ingestion_seq.cmp(&a.ingestion_seq))
    });

    for scene in ordered {
        if scene.capture_date < start || scene.capture_date > end {
            debug!(scene = %scene.id, date = %scene.capture_date, "Scene outside window");
            continue;
        }
        if !policy.accepts_cloud_cover(scene.cloud_cover_percent) {
            debug!(
                scene = %scene.id,
                cloud_cover = scene.cloud_cover_percent,
                "Scene above cloud ceiling"
            );
            continue;
        }
        return Ok(scene.clone());
    }

    Err(SurfaceError::no_data(format!(
        "no scene with cloud cover <= {}% between {} and {} ({} candidates)",
        policy.max_cloud_cover,
        start,
        end,
        candidates.len()
    )))
}
