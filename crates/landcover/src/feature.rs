//! Raw vector features as returned by the vector source.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Feature tags. Keys are unique; ordering is stable for output.
pub type Tags = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Way,
    Relation,
}

/// Source-stable identifier. Ways and relations have separate id spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId {
    pub kind: FeatureKind,
    pub id: i64,
}

impl FeatureId {
    pub fn way(id: i64) -> Self {
        Self {
            kind: FeatureKind::Way,
            id,
        }
    }

    pub fn relation(id: i64) -> Self {
        Self {
            kind: FeatureKind::Relation,
            id,
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FeatureKind::Way => write!(f, "way/{}", self.id),
            FeatureKind::Relation => write!(f, "relation/{}", self.id),
        }
    }
}

/// One member way of a relation, with its resolved node coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationMember {
    /// `outer`, `inner`, or empty (treated as outer).
    pub role: String,
    /// `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

impl RelationMember {
    pub fn outer(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            role: "outer".to_string(),
            coordinates,
        }
    }

    pub fn inner(coordinates: Vec<[f64; 2]>) -> Self {
        Self {
            role: "inner".to_string(),
            coordinates,
        }
    }

    pub fn is_outer(&self) -> bool {
        self.role.is_empty() || self.role == "outer"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawGeometry {
    /// A way's node coordinates, `[lon, lat]`, possibly not closed.
    Way(Vec<[f64; 2]>),
    /// A multipolygon relation's member ways.
    Relation(Vec<RelationMember>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    pub id: FeatureId,
    pub geometry: RawGeometry,
    pub tags: Tags,
}

impl RawFeature {
    pub fn way(id: i64, coordinates: Vec<[f64; 2]>, tags: Tags) -> Self {
        Self {
            id: FeatureId::way(id),
            geometry: RawGeometry::Way(coordinates),
            tags,
        }
    }

    pub fn relation(id: i64, members: Vec<RelationMember>, tags: Tags) -> Self {
        Self {
            id: FeatureId::relation(id),
            geometry: RawGeometry::Relation(members),
            tags,
        }
    }
}
