//! Common types and utilities shared across the surface-layers crates.

pub mod bbox;
pub mod error;

pub use bbox::{BoundingBox, METERS_PER_DEGREE};
pub use error::{SurfaceError, SurfaceResult};
