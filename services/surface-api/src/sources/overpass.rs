//! Overpass API client for OpenStreetMap ways and multipolygon relations.

use std::time::Instant;

use async_trait::async_trait;
use landcover::{RawFeature, RelationMember, TagPredicate, Tags};
use reqwest::Client;
use serde::Deserialize;
use surface_common::{BoundingBox, SurfaceError, SurfaceResult};
use tracing::{debug, info, instrument, warn};

use super::{transport_error, VectorFeatureSource};
use crate::config::OverpassConfig;

/// Queries a list of Overpass mirrors, first success wins.
///
/// Each mirror attempt is bounded by `attempt_timeout_secs`, so a mirror
/// that accepts the connection and never answers costs one attempt budget
/// and the next mirror is still tried within the caller's overall budget.
pub struct OverpassClient {
    client: Client,
    urls: Vec<String>,
    attempt_timeout_secs: u64,
}

impl OverpassClient {
    pub fn new(config: &OverpassConfig) -> SurfaceResult<Self> {
        let client = Client::builder()
            .timeout(config.attempt_timeout())
            .user_agent(concat!("surface-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SurfaceError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            urls: config.urls.clone(),
            attempt_timeout_secs: config.attempt_timeout_secs,
        })
    }

    /// Render an Overpass QL union of one `way` and one multipolygon
    /// `relation` statement per filter, returning full geometry.
    pub fn build_query(bbox: &BoundingBox, filters: &[TagPredicate], timeout_secs: u64) -> String {
        let b = bbox.to_overpass_string();
        let statements: String = filters
            .iter()
            .map(|filter| {
                let f = filter.to_overpass_filter();
                format!(
                    "  way{}({});\n  relation[\"type\"=\"multipolygon\"]{}({});\n",
                    f, b, f, b
                )
            })
            .collect();
        format!(
            "[out:json][timeout:{}];\n(\n{});\nout geom;\n",
            timeout_secs, statements
        )
    }

    async fn post_query(&self, url: &str, query: &str) -> SurfaceResult<String> {
        let response = self
            .client
            .post(url)
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            // Overpass answers 504 when its own query budget runs out.
            let msg = format!("{}: HTTP {}", url, status);
            return Err(if status.as_u16() == 504 {
                SurfaceError::timeout(msg)
            } else {
                SurfaceError::unavailable(msg)
            });
        }

        response.text().await.map_err(|e| transport_error(url, e))
    }
}

#[async_trait]
impl VectorFeatureSource for OverpassClient {
    #[instrument(skip(self, filters), fields(bbox = %bbox.to_overpass_string(), filters = filters.len()))]
    async fn fetch(
        &self,
        bbox: &BoundingBox,
        filters: &[TagPredicate],
    ) -> SurfaceResult<Vec<RawFeature>> {
        let query = Self::build_query(bbox, filters, self.attempt_timeout_secs);
        let mut last_error = SurfaceError::unavailable("no Overpass mirrors configured");

        for url in &self.urls {
            debug!(url = %url, "Querying Overpass mirror");
            let start = Instant::now();
            let body = match self.post_query(url, &query).await {
                Ok(body) => body,
                Err(err) => {
                    warn!(
                        url = %url,
                        error = %err,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Overpass mirror failed"
                    );
                    last_error = err;
                    continue;
                }
            };

            match parse_response(&body) {
                Ok(features) => {
                    info!(url = %url, features = features.len(), "Fetched features");
                    return Ok(features);
                }
                Err(err) => {
                    warn!(url = %url, error = %err, "Overpass mirror returned malformed JSON");
                    last_error = SurfaceError::unavailable(format!("{}: {}", url, err));
                }
            }
        }

        Err(last_error)
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    #[serde(default)]
    tags: Tags,
    geometry: Option<Vec<OverpassPoint>>,
    #[serde(default)]
    members: Vec<OverpassMember>,
}

#[derive(Debug, Deserialize)]
struct OverpassMember {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    role: String,
    geometry: Option<Vec<OverpassPoint>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct OverpassPoint {
    lat: f64,
    lon: f64,
}

fn to_coordinates(points: &[OverpassPoint]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.lon, p.lat]).collect()
}

impl OverpassElement {
    /// Nodes, elements without geometry and relations without way
    /// members yield `None`.
    fn into_raw_feature(self) -> Option<RawFeature> {
        match self.kind.as_str() {
            "way" => {
                let points = self.geometry?;
                Some(RawFeature::way(self.id, to_coordinates(&points), self.tags))
            }
            "relation" => {
                let members: Vec<RelationMember> = self
                    .members
                    .into_iter()
                    .filter(|m| m.kind == "way")
                    .filter_map(|m| {
                        let points = m.geometry?;
                        Some(RelationMember {
                            role: m.role,
                            coordinates: to_coordinates(&points),
                        })
                    })
                    .collect();
                if members.is_empty() {
                    return None;
                }
                Some(RawFeature::relation(self.id, members, self.tags))
            }
            _ => None,
        }
    }
}

/// Decode an Overpass `out geom` JSON body into raw features.
pub fn parse_response(body: &str) -> SurfaceResult<Vec<RawFeature>> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(response
        .elements
        .into_iter()
        .filter_map(OverpassElement::into_raw_feature)
        .collect())
}
