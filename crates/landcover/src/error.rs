//! Feature-level geometry errors.

use thiserror::Error;

/// Why a single feature's geometry could not be turned into a polygon.
///
/// These drop the offending feature only; they are never request failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A relation with no usable outer member.
    #[error("relation has no outer ring")]
    NoOuterRing,

    /// Outer members form several disjoint rings.
    #[error("relation resolves to {0} outer rings, expected one")]
    MultipleOuterRings(usize),

    /// Fewer than three distinct vertices.
    #[error("ring has {0} distinct vertices, need at least 3")]
    TooFewVertices(usize),

    /// NaN or infinite coordinate.
    #[error("ring contains a non-finite coordinate")]
    NonFiniteCoordinate,
}
