//! HTTP client for the thermal imagery service.
//!
//! Endpoints:
//! - `POST {base}/scenes/search` with a [`SceneQuery`] body, answering
//!   `{"scenes": [SceneCandidate, ..]}`
//! - `POST {base}/scenes/{id}/samples` with `{"bbox": [w, s, e, n], "band": ..}`,
//!   answering `{"samples": [ThermalSample, ..]}`
//!
//! Scene ids are percent-encoded as a single path segment.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use surface_common::{BoundingBox, SurfaceError, SurfaceResult};
use thermal::{SceneCandidate, SceneQuery, ThermalSample};
use tracing::{debug, info, instrument};

use super::{transport_error, ThermalImagerySource};
use crate::config::ImageryConfig;

const SOURCE: &str = "imagery service";

pub struct HttpImageryClient {
    client: Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    scenes: Vec<SceneCandidate>,
}

#[derive(Debug, Serialize)]
struct SamplesRequest<'a> {
    bbox: [f64; 4],
    band: &'a str,
}

#[derive(Debug, Deserialize)]
struct SamplesResponse {
    #[serde(default)]
    samples: Vec<ThermalSample>,
}

impl HttpImageryClient {
    pub fn new(config: &ImageryConfig) -> SurfaceResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SurfaceError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            SurfaceError::Internal(format!("Invalid imagery base URL {:?}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SurfaceError::Internal(format!(
                "Imagery base URL cannot carry a path: {}",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn post_json<B, R>(&self, url: &Url, body: &B) -> SurfaceResult<R>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(SOURCE, e))?;

        let status = response.status();
        if !status.is_success() {
            let msg = format!("{} returned HTTP {} for {}", SOURCE, status, url);
            return Err(if status.as_u16() == 504 {
                SurfaceError::timeout(msg)
            } else {
                SurfaceError::unavailable(msg)
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|e| SurfaceError::unavailable(format!("{} sent an invalid body: {}", SOURCE, e)))
    }
}

#[async_trait]
impl ThermalImagerySource for HttpImageryClient {
    #[instrument(skip(self, query), fields(band = %query.band, start = %query.start, end = %query.end))]
    async fn search(&self, query: &SceneQuery) -> SurfaceResult<Vec<SceneCandidate>> {
        let url = self.endpoint(&["scenes", "search"]);
        debug!(url = %url, "Searching scenes");
        let response: SearchResponse = self.post_json(&url, query).await?;
        info!(candidates = response.scenes.len(), "Scene search complete");
        Ok(response.scenes)
    }

    #[instrument(skip(self, scene, bbox), fields(scene = %scene.id))]
    async fn samples(
        &self,
        scene: &SceneCandidate,
        bbox: &BoundingBox,
        band: &str,
    ) -> SurfaceResult<Vec<ThermalSample>> {
        let url = self.endpoint(&["scenes", &scene.id, "samples"]);
        let body = SamplesRequest {
            bbox: bbox.to_wsen(),
            band,
        };
        let response: SamplesResponse = self.post_json(&url, &body).await?;
        info!(samples = response.samples.len(), "Fetched scene samples");
        Ok(response.samples)
    }
}
