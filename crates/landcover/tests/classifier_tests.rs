//! Rule-order and partition tests for land-cover classification.

use landcover::classifier::{matching_rule, PAVED_SURFACES, RULES, UNPAVED_SURFACES};
use landcover::{assemble, classify, fetch_filters, RawFeature, SurfaceCategory, Tags};
use std::collections::HashSet;
use test_utils::{square_way, tags};

/// A spread of tag sets covering every rule plus conflicting combinations.
fn tag_corpus() -> Vec<Tags> {
    let mut corpus = vec![
        tags(tags::BUILDING),
        tags(&[("building", "house"), ("surface", "grass")]),
        tags(tags::PARKING),
        tags(tags::GRAVEL_PARKING),
        tags(tags::INDUSTRIAL),
        tags(&[("landuse", "retail")]),
        tags(tags::FOREST),
        tags(&[("landuse", "residential")]),
        tags(tags::RUNWAY),
        tags(&[("aeroway", "helipad")]),
        tags(tags::PEDESTRIAN_AREA),
        tags(&[("highway", "pedestrian")]),
        tags(tags::WOOD),
        tags(tags::WATER),
        tags(tags::PARK),
        tags(tags::PAVED_PARK),
        tags(&[("leisure", "pitch")]),
        tags(tags::UNRELATED),
        tags(&[("building", "yes"), ("natural", "wood")]),
        tags(&[("surface", "unknown_value")]),
        Tags::new(),
    ];
    for value in PAVED_SURFACES.iter().chain(UNPAVED_SURFACES) {
        corpus.push(tags(&[("surface", *value), ("leisure", "park")]));
    }
    corpus
}

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn test_reference_examples() {
    assert_eq!(classify(&tags(tags::BUILDING)), SurfaceCategory::Sealed);
    assert_eq!(classify(&tags(tags::PAVED_PARK)), SurfaceCategory::Sealed);
    assert_eq!(classify(&tags(tags::WOOD)), SurfaceCategory::Unsealed);
    assert_eq!(classify(&tags(tags::UNRELATED)), SurfaceCategory::Excluded);
}

#[test]
fn test_surface_refinement_unseals_structural_sealed() {
    assert_eq!(
        classify(&tags(tags::GRAVEL_PARKING)),
        SurfaceCategory::Unsealed
    );
    assert_eq!(
        classify(&tags(&[("building", "house"), ("surface", "grass")])),
        SurfaceCategory::Unsealed
    );
}

#[test]
fn test_sealed_structural_beats_unsealed_structural() {
    assert_eq!(
        classify(&tags(&[("building", "yes"), ("natural", "wood")])),
        SurfaceCategory::Sealed
    );
}

#[test]
fn test_pedestrian_needs_area() {
    assert_eq!(
        classify(&tags(tags::PEDESTRIAN_AREA)),
        SurfaceCategory::Sealed
    );
    assert_eq!(
        classify(&tags(&[("highway", "pedestrian")])),
        SurfaceCategory::Excluded
    );
}

// ============================================================================
// Purity / determinism
// ============================================================================

#[test]
fn test_classification_is_idempotent() {
    for t in tag_corpus() {
        let first = classify(&t);
        let second = classify(&t);
        assert_eq!(first, second, "unstable classification for {:?}", t);
        assert_eq!(classify(&t.clone()), first);
    }
}

#[test]
fn test_every_match_points_at_a_rule() {
    for t in tag_corpus() {
        match matching_rule(&t) {
            Some((idx, category)) => {
                assert!(idx < RULES.len());
                assert_eq!(classify(&t), category);
                assert_ne!(category, SurfaceCategory::Excluded);
            }
            None => assert_eq!(classify(&t), SurfaceCategory::Excluded),
        }
    }
}

#[test]
fn test_fetch_filters_cover_structural_rules() {
    let sealed = fetch_filters(SurfaceCategory::Sealed);
    let unsealed = fetch_filters(SurfaceCategory::Unsealed);

    // Anything matched by a sealed-leaning filter and not refined by
    // `surface` classifies as sealed.
    for t in tag_corpus() {
        if t.contains_key("surface") {
            continue;
        }
        if sealed.iter().any(|p| p.matches(&t)) {
            assert_eq!(classify(&t), SurfaceCategory::Sealed, "{:?}", t);
        } else if unsealed.iter().any(|p| p.matches(&t)) {
            assert_eq!(classify(&t), SurfaceCategory::Unsealed, "{:?}", t);
        }
    }
}

// ============================================================================
// Assembly partition
// ============================================================================

#[test]
fn test_outputs_are_disjoint_by_id() {
    let corpus = tag_corpus();
    let features: Vec<RawFeature> = corpus
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let mut feature = square_way(i as i64, &[]);
            feature.tags = t.clone();
            feature
        })
        .collect();

    // Overlapping halves so many features appear in both fetches.
    let split = features.len() * 2 / 3;
    let sealed_fetch = features[..split].to_vec();
    let unsealed_fetch = features[split / 2..].to_vec();

    let layers = assemble(Ok(sealed_fetch), Ok(unsealed_fetch)).unwrap();

    let sealed_ids: HashSet<_> = layers.sealed.iter().map(|f| f.id).collect();
    let unsealed_ids: HashSet<_> = layers.unsealed.iter().map(|f| f.id).collect();
    assert!(sealed_ids.is_disjoint(&unsealed_ids));
    assert_eq!(sealed_ids.len(), layers.sealed_count(), "duplicate sealed ids");
    assert_eq!(unsealed_ids.len(), layers.unsealed_count(), "duplicate unsealed ids");

    let expected_sealed = corpus
        .iter()
        .filter(|t| classify(t) == SurfaceCategory::Sealed)
        .count();
    let expected_unsealed = corpus
        .iter()
        .filter(|t| classify(t) == SurfaceCategory::Unsealed)
        .count();
    assert_eq!(layers.sealed_count(), expected_sealed);
    assert_eq!(layers.unsealed_count(), expected_unsealed);

    for feature in layers.sealed.iter().chain(&layers.unsealed) {
        assert_eq!(feature.category, classify(&feature.tags));
    }
}

#[test]
fn test_tags_carried_through() {
    let pairs = &[("building", "yes"), ("name", "Town Hall")];
    let layers = assemble(Ok(vec![square_way(1, pairs)]), Ok(vec![])).unwrap();
    assert_eq!(layers.sealed[0].tags, tags(pairs));
}
