//! Outer-ring resolution for ways and multipolygon relations.

use std::collections::HashSet;

use crate::error::GeometryError;
use crate::feature::RawGeometry;

/// A closed polygon ring of `[lon, lat]` pairs (first == last).
pub type Ring = Vec<[f64; 2]>;

/// Vertices closer than this (in degrees) are the same node.
const SAME_POINT_EPSILON: f64 = 1e-9;

/// Resolve a feature's geometry to a single closed outer ring.
///
/// Ways are used as-is. Relation members with an `outer` (or empty) role are
/// joined end-to-end; inner members are ignored. A relation must resolve to
/// exactly one ring.
pub fn resolve_outer_ring(geometry: &RawGeometry) -> Result<Ring, GeometryError> {
    match geometry {
        RawGeometry::Way(coordinates) => normalize_ring(coordinates),
        RawGeometry::Relation(members) => {
            let segments: Vec<Ring> = members
                .iter()
                .filter(|m| m.is_outer() && !m.coordinates.is_empty())
                .map(|m| m.coordinates.clone())
                .collect();

            let mut rings = stitch(segments);
            match rings.len() {
                0 => Err(GeometryError::NoOuterRing),
                1 => normalize_ring(&rings.remove(0)),
                n => Err(GeometryError::MultipleOuterRings(n)),
            }
        }
    }
}

/// Close an open ring and reject degenerate ones.
pub fn normalize_ring(coordinates: &[[f64; 2]]) -> Result<Ring, GeometryError> {
    if coordinates
        .iter()
        .any(|[lon, lat]| !lon.is_finite() || !lat.is_finite())
    {
        return Err(GeometryError::NonFiniteCoordinate);
    }

    let mut ring: Ring = Vec::with_capacity(coordinates.len() + 1);
    for &point in coordinates {
        if ring.last().is_some_and(|&last| same_point(last, point)) {
            continue;
        }
        ring.push(point);
    }

    let distinct: HashSet<(u64, u64)> = ring
        .iter()
        .map(|[lon, lat]| (lon.to_bits(), lat.to_bits()))
        .collect();
    if distinct.len() < 3 {
        return Err(GeometryError::TooFewVertices(distinct.len()));
    }

    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if !same_point(first, last) {
            ring.push(first);
        }
    }

    Ok(ring)
}

/// Join segments sharing end nodes into chains. Each chain is one ring
/// candidate; chains that never close are left open for `normalize_ring`.
fn stitch(mut remaining: Vec<Ring>) -> Vec<Ring> {
    let mut rings = Vec::new();

    while !remaining.is_empty() {
        let mut chain = remaining.remove(0);

        loop {
            let (Some(&head), Some(&tail)) = (chain.first(), chain.last()) else {
                break;
            };
            if chain.len() > 1 && same_point(head, tail) {
                break;
            }

            if let Some(idx) = remaining.iter().position(|s| touches(s, tail)) {
                let mut segment = remaining.remove(idx);
                if !segment.first().is_some_and(|&p| same_point(p, tail)) {
                    segment.reverse();
                }
                chain.extend(segment.into_iter().skip(1));
            } else if let Some(idx) = remaining.iter().position(|s| touches(s, head)) {
                let mut segment = remaining.remove(idx);
                if !segment.last().is_some_and(|&p| same_point(p, head)) {
                    segment.reverse();
                }
                segment.pop();
                segment.extend(chain);
                chain = segment;
            } else {
                break;
            }
        }

        rings.push(chain);
    }

    rings
}

fn touches(segment: &[[f64; 2]], point: [f64; 2]) -> bool {
    segment.first().is_some_and(|&p| same_point(p, point))
        || segment.last().is_some_and(|&p| same_point(p, point))
}

fn same_point(a: [f64; 2], b: [f64; 2]) -> bool {
    (a[0] - b[0]).abs() < SAME_POINT_EPSILON && (a[1] - b[1]).abs() < SAME_POINT_EPSILON
}
