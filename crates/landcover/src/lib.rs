//! Land-cover classification for vector map features.
//!
//! Raw features (ways and multipolygon relations with their tags) are turned
//! into two disjoint collections, sealed and unsealed, by an ordered list of
//! tag rules. The same rules produce the tag filters used to fetch features
//! from the vector source.

pub mod assembler;
pub mod classifier;
pub mod error;
pub mod feature;
pub mod predicate;
pub mod ring;

pub use assembler::{assemble, AssembledLayers, ClassifiedFeature, FetchCategory, FetchOutcome};
pub use classifier::{classify, fetch_filters, SurfaceCategory};
pub use error::GeometryError;
pub use feature::{FeatureId, FeatureKind, RawFeature, RawGeometry, RelationMember, Tags};
pub use predicate::TagPredicate;
