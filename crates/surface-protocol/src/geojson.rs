//! GeoJSON types for product responses.
//!
//! Both products are emitted as `FeatureCollection`s of polygons. Feature
//! properties are free-form JSON objects: the vector product carries the
//! source tags, the temperature product carries `temperature` plus the cell
//! address.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form GeoJSON properties object.
pub type Properties = Map<String, Value>;

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Array of features.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Create a new empty FeatureCollection.
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }

    /// Add a feature to the collection.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Add multiple features to the collection.
    pub fn with_features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.features.extend(features);
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self::new().with_features(iter)
    }
}

/// A GeoJSON Feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    /// Optional feature identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The geometry of this feature.
    pub geometry: Geometry,

    /// Feature attributes.
    pub properties: Properties,
}

impl Feature {
    /// Create a feature with empty properties.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            type_: "Feature".to_string(),
            id: None,
            geometry,
            properties: Properties::new(),
        }
    }

    /// Set the feature ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the properties.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Set a single property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// GeoJSON geometry types emitted by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A polygon geometry.
    Polygon {
        /// Array of linear rings (first is exterior, rest are holes).
        /// Each ring is an array of [longitude, latitude] coordinate pairs.
        coordinates: Vec<Vec<[f64; 2]>>,
    },
}

impl Geometry {
    /// Create a polygon geometry.
    pub fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Geometry::Polygon { coordinates: rings }
    }

    /// Closed rectangle from `[west, south, east, north]`, counter-clockwise.
    pub fn rectangle(west: f64, south: f64, east: f64, north: f64) -> Self {
        Geometry::polygon(vec![vec![
            [west, south],
            [east, south],
            [east, north],
            [west, north],
            [west, south],
        ]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_collection_serialization() {
        let fc = FeatureCollection::new().with_feature(
            Feature::new(Geometry::rectangle(0.0, 0.0, 1.0, 1.0))
                .with_id("way/1")
                .with_property("building", "yes"),
        );

        let json = serde_json::to_value(&fc).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["type"], "Feature");
        assert_eq!(json["features"][0]["id"], "way/1");
        assert_eq!(json["features"][0]["geometry"]["type"], "Polygon");
        assert_eq!(json["features"][0]["properties"]["building"], "yes");
    }

    #[test]
    fn test_rectangle_is_closed() {
        let Geometry::Polygon { coordinates } = Geometry::rectangle(1.0, 2.0, 3.0, 4.0);
        let ring = &coordinates[0];
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_empty_collection_shape() {
        let json = serde_json::to_string(&FeatureCollection::default()).unwrap();
        assert_eq!(json, r#"{"type":"FeatureCollection","features":[]}"#);
    }

    #[test]
    fn test_id_omitted_when_absent() {
        let json = serde_json::to_value(Feature::new(Geometry::rectangle(0.0, 0.0, 1.0, 1.0))).unwrap();
        assert!(json.get("id").is_none());
    }
}
