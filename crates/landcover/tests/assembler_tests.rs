//! Assembly of the two fetch results into sealed and unsealed layers.

use landcover::{assemble, FeatureId, GeometryError, RawFeature, RelationMember};
use surface_common::SurfaceError;
use test_utils::{degenerate_way, split_relation, square, square_way, tags};

#[test]
fn test_partition_by_classification() {
    let sealed = vec![square_way(1, tags::BUILDING), square_way(2, tags::UNRELATED)];
    let unsealed = vec![square_way(3, tags::WOOD)];

    let layers = assemble(Ok(sealed), Ok(unsealed)).unwrap();
    assert_eq!(layers.sealed_count(), 1);
    assert_eq!(layers.unsealed_count(), 1);
    assert!(!layers.is_partial());
    assert_eq!(layers.sealed[0].ring.first(), layers.sealed[0].ring.last());
}

#[test]
fn test_duplicate_processed_once() {
    let park = square_way(7, tags::PAVED_PARK);
    let layers = assemble(Ok(vec![park.clone()]), Ok(vec![park])).unwrap();
    assert_eq!(layers.sealed_count(), 1);
    assert_eq!(layers.unsealed_count(), 0);
}

#[test]
fn test_way_and_relation_with_same_number_are_distinct() {
    let layers = assemble(
        Ok(vec![square_way(5, tags::BUILDING)]),
        Ok(vec![split_relation(5, tags::FOREST)]),
    )
    .unwrap();
    assert_eq!(layers.sealed[0].id, FeatureId::way(5));
    assert_eq!(layers.unsealed[0].id, FeatureId::relation(5));
}

#[test]
fn test_split_outer_ring_is_stitched() {
    let layers = assemble(Ok(vec![]), Ok(vec![split_relation(1, tags::FOREST)])).unwrap();
    let ring = &layers.unsealed[0].ring;
    assert_eq!(ring.first(), ring.last());
    // Four corners plus the closing vertex; the inner member is ignored.
    assert_eq!(ring.len(), 5);
}

#[test]
fn test_bad_features_dropped_alone() {
    let sealed = vec![
        RawFeature::relation(
            9,
            vec![RelationMember::inner(square(6.8, 51.1, 1e-3))],
            tags(tags::BUILDING),
        ),
        degenerate_way(11, tags::PARKING),
        square_way(10, tags::BUILDING),
    ];
    let layers = assemble(Ok(sealed), Ok(vec![])).unwrap();
    assert_eq!(layers.sealed_count(), 1);
    assert_eq!(layers.dropped.len(), 2);
    assert_eq!(layers.dropped[0].error, GeometryError::NoOuterRing);
    assert_eq!(layers.dropped[1].error, GeometryError::TooFewVertices(2));
    assert!(!layers.is_partial());
}

#[test]
fn test_one_failed_fetch_is_partial() {
    // Fetched by the unsealed query but classified sealed: no back-fill.
    let unsealed = vec![square_way(3, tags::WOOD), square_way(4, tags::PAVED_PARK)];
    let layers = assemble(Err(SurfaceError::timeout("overpass")), Ok(unsealed)).unwrap();
    assert!(layers.is_partial());
    assert_eq!(layers.sealed_count(), 0);
    assert_eq!(layers.unsealed_count(), 1);
    assert!(matches!(layers.failures[0], SurfaceError::PartialFetchFailure(_)));
    assert!(layers.warnings()[0].contains("sealed"));
}

#[test]
fn test_both_failed_is_request_error() {
    let result = assemble(
        Err(SurfaceError::unavailable("mirror down")),
        Err(SurfaceError::timeout("slow")),
    );
    assert!(matches!(result, Err(SurfaceError::DataSourceUnavailable(_))));

    let result = assemble(Err(SurfaceError::timeout("a")), Err(SurfaceError::timeout("b")));
    assert!(matches!(result, Err(SurfaceError::DataSourceTimeout(_))));
}
