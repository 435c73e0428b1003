//! Turns the two raw fetch results into disjoint sealed/unsealed layers.

use std::collections::HashSet;

use surface_common::{SurfaceError, SurfaceResult};
use tracing::{debug, warn};

use crate::classifier::{classify, SurfaceCategory};
use crate::error::GeometryError;
use crate::feature::{FeatureId, RawFeature, Tags};
use crate::ring::{resolve_outer_ring, Ring};

/// Which of the two source queries a fetch result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchCategory {
    /// Query built from the sealed structural rules.
    SealedLeaning,
    /// Query built from the unsealed structural rules.
    UnsealedLeaning,
}

impl FetchCategory {
    /// The output category whose collection depends on this fetch.
    pub fn category(self) -> SurfaceCategory {
        match self {
            FetchCategory::SealedLeaning => SurfaceCategory::Sealed,
            FetchCategory::UnsealedLeaning => SurfaceCategory::Unsealed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FetchCategory::SealedLeaning => "sealed",
            FetchCategory::UnsealedLeaning => "unsealed",
        }
    }
}

/// Result of one source query.
pub type FetchOutcome = SurfaceResult<Vec<RawFeature>>;

/// A feature with its resolved polygon and final category.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedFeature {
    pub id: FeatureId,
    pub ring: Ring,
    pub category: SurfaceCategory,
    pub tags: Tags,
}

/// A feature dropped because its geometry could not be resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedFeature {
    pub id: FeatureId,
    pub error: GeometryError,
}

#[derive(Debug, Clone, Default)]
pub struct AssembledLayers {
    pub sealed: Vec<ClassifiedFeature>,
    pub unsealed: Vec<ClassifiedFeature>,
    pub dropped: Vec<DroppedFeature>,
    /// `PartialFetchFailure` per failed query; that category's layer is empty.
    pub failures: Vec<SurfaceError>,
}

impl AssembledLayers {
    pub fn sealed_count(&self) -> usize {
        self.sealed.len()
    }

    pub fn unsealed_count(&self) -> usize {
        self.unsealed.len()
    }

    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.failures.iter().map(|e| e.to_string()).collect()
    }
}

/// Merge, classify and partition the two fetch results.
///
/// A feature present in both results is processed once. If one query
/// failed, the collection for its category is emitted empty and the
/// failure is recorded; features the other query returned are not used to
/// back-fill it. Fails only when both queries failed.
pub fn assemble(
    sealed_fetch: FetchOutcome,
    unsealed_fetch: FetchOutcome,
) -> SurfaceResult<AssembledLayers> {
    let mut layers = AssembledLayers::default();
    let mut batches = Vec::with_capacity(2);
    let mut errors = Vec::new();

    for (query, outcome) in [
        (FetchCategory::SealedLeaning, sealed_fetch),
        (FetchCategory::UnsealedLeaning, unsealed_fetch),
    ] {
        match outcome {
            Ok(features) => batches.push(features),
            Err(err) => {
                warn!(query = query.label(), error = %err, "Feature fetch failed");
                errors.push((query, err));
            }
        }
    }

    if batches.is_empty() {
        return Err(combine_failures(&errors));
    }

    let mut seen: HashSet<FeatureId> = HashSet::new();
    for feature in batches.into_iter().flatten() {
        if !seen.insert(feature.id) {
            continue;
        }

        let category = classify(&feature.tags);
        if category == SurfaceCategory::Excluded {
            continue;
        }

        let ring = match resolve_outer_ring(&feature.geometry) {
            Ok(ring) => ring,
            Err(error) => {
                debug!(id = %feature.id, error = %error, "Dropping feature");
                layers.dropped.push(DroppedFeature {
                    id: feature.id,
                    error,
                });
                continue;
            }
        };

        let classified = ClassifiedFeature {
            id: feature.id,
            ring,
            category,
            tags: feature.tags,
        };
        match category {
            SurfaceCategory::Sealed => layers.sealed.push(classified),
            SurfaceCategory::Unsealed => layers.unsealed.push(classified),
            SurfaceCategory::Excluded => {}
        }
    }

    for (query, err) in errors {
        match query.category() {
            SurfaceCategory::Sealed => layers.sealed.clear(),
            SurfaceCategory::Unsealed => layers.unsealed.clear(),
            SurfaceCategory::Excluded => {}
        }
        layers.failures.push(SurfaceError::PartialFetchFailure(format!(
            "{} features unavailable: {}",
            query.label(),
            err
        )));
    }

    if !layers.dropped.is_empty() {
        warn!(
            dropped = layers.dropped.len(),
            "Dropped features with unresolvable geometry"
        );
    }

    Ok(layers)
}

fn combine_failures(errors: &[(FetchCategory, SurfaceError)]) -> SurfaceError {
    let detail = errors
        .iter()
        .map(|(query, err)| format!("{}: {}", query.label(), err))
        .collect::<Vec<_>>()
        .join("; ");

    let all_timeouts = errors
        .iter()
        .all(|(_, err)| matches!(err, SurfaceError::DataSourceTimeout(_)));
    if all_timeouts {
        SurfaceError::timeout(detail)
    } else {
        SurfaceError::unavailable(detail)
    }
}
