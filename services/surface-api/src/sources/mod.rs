//! External collaborators: the vector feature source and the thermal
//! imagery source.

pub mod imagery;
pub mod overpass;

use async_trait::async_trait;
use landcover::{RawFeature, TagPredicate};
use surface_common::{BoundingBox, SurfaceError, SurfaceResult};
use thermal::{SceneCandidate, SceneQuery, ThermalSample};

pub use imagery::HttpImageryClient;
pub use overpass::OverpassClient;

/// Source of tagged vector features (ways and multipolygon relations).
#[async_trait]
pub trait VectorFeatureSource: Send + Sync {
    /// All features inside `bbox` matching any of `filters`.
    async fn fetch(
        &self,
        bbox: &BoundingBox,
        filters: &[TagPredicate],
    ) -> SurfaceResult<Vec<RawFeature>>;
}

/// Source of thermal satellite scenes and their pixel samples.
#[async_trait]
pub trait ThermalImagerySource: Send + Sync {
    /// Candidate scenes intersecting the query bbox. The source may apply
    /// the window and cloud ceiling itself; the caller re-checks both.
    async fn search(&self, query: &SceneQuery) -> SurfaceResult<Vec<SceneCandidate>>;

    /// Raw samples of one band of `scene` inside `bbox`.
    async fn samples(
        &self,
        scene: &SceneCandidate,
        bbox: &BoundingBox,
        band: &str,
    ) -> SurfaceResult<Vec<ThermalSample>>;
}

/// Classify a transport failure as timeout or unavailability.
pub(crate) fn transport_error(source: &str, err: reqwest::Error) -> SurfaceError {
    if err.is_timeout() {
        SurfaceError::timeout(format!("{}: {}", source, err))
    } else {
        SurfaceError::unavailable(format!("{}: {}", source, err))
    }
}
