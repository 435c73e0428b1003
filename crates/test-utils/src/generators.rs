//! Generators for synthetic vector features, scenes and thermal samples.
//!
//! These create predictable, verifiable inputs for the land-cover and
//! thermal pipelines without touching a network source.

use chrono::NaiveDate;
use landcover::{RawFeature, RelationMember, Tags};
use thermal::{GridSpec, SceneCandidate, ThermalSample};

/// Builds a tag map from `(key, value)` pairs.
///
/// # Example
///
/// ```
/// use test_utils::tags;
///
/// let t = tags(&[("building", "yes")]);
/// assert_eq!(t.get("building").map(String::as_str), Some("yes"));
/// ```
pub fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Open ring for an axis-aligned square, `[lon, lat]`, counter-clockwise.
pub fn square(lon: f64, lat: f64, size_deg: f64) -> Vec<[f64; 2]> {
    vec![
        [lon, lat],
        [lon + size_deg, lat],
        [lon + size_deg, lat + size_deg],
        [lon, lat + size_deg],
    ]
}

/// A closed square way with the given tags.
///
/// Square corners are offset by `id` so distinct ids never share geometry.
pub fn square_way(id: i64, pairs: &[(&str, &str)]) -> RawFeature {
    let offset = id as f64 * 1e-3;
    let mut ring = square(6.8 + offset, 51.1 + offset, 5e-4);
    ring.push(ring[0]);
    RawFeature::way(id, ring, tags(pairs))
}

/// A multipolygon relation whose outer ring is split over two member ways,
/// plus one inner ring.
pub fn split_relation(id: i64, pairs: &[(&str, &str)]) -> RawFeature {
    let [a, b, c, d] = [[6.80, 51.10], [6.81, 51.10], [6.81, 51.11], [6.80, 51.11]];
    RawFeature::relation(
        id,
        vec![
            RelationMember::outer(vec![a, b, c]),
            RelationMember::outer(vec![c, d, a]),
            RelationMember::inner(square(6.803, 51.103, 0.002)),
        ],
        tags(pairs),
    )
}

/// A way with too few distinct vertices to form a polygon.
pub fn degenerate_way(id: i64, pairs: &[(&str, &str)]) -> RawFeature {
    RawFeature::way(id, vec![[6.8, 51.1], [6.8, 51.1], [6.81, 51.1]], tags(pairs))
}

/// A scene candidate with ingestion sequence 0.
pub fn scene(id: &str, capture_date: NaiveDate, cloud_cover_percent: f64) -> SceneCandidate {
    SceneCandidate {
        id: id.to_string(),
        capture_date,
        cloud_cover_percent,
        ingestion_seq: 0,
    }
}

/// One sample at the centre of every grid cell, all with the same DN.
pub fn uniform_samples(spec: &GridSpec, digital_number: u16) -> Vec<ThermalSample> {
    gradient_samples(spec, |_, _| digital_number)
}

/// One sample at the centre of every grid cell, DN chosen per `(row, col)`.
///
/// # Example
///
/// ```
/// use surface_common::BoundingBox;
/// use test_utils::gradient_samples;
/// use thermal::GridSpec;
///
/// let bbox = BoundingBox::from_center(0.0, 0.0, 0.2).unwrap();
/// let spec = GridSpec::new(bbox, 100.0).unwrap();
/// let samples = gradient_samples(&spec, |row, col| 40_000 + (row * 10 + col) as u16);
/// assert_eq!(samples.len(), 4);
/// ```
pub fn gradient_samples(
    spec: &GridSpec,
    digital_number: impl Fn(usize, usize) -> u16,
) -> Vec<ThermalSample> {
    let mut samples = Vec::with_capacity(spec.len());
    for row in 0..spec.rows {
        for col in 0..spec.cols {
            let [w, s, e, n] = spec.cell_bounds(row, col);
            samples.push(ThermalSample::new(
                (w + e) / 2.0,
                (s + n) / 2.0,
                digital_number(row, col),
            ));
        }
    }
    samples
}
