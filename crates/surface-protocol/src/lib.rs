//! Surface Layers API protocol types.
//!
//! GeoJSON output shapes consumed by the map frontend, the request body
//! shared by both product endpoints, and the response/exception bodies.
//!
//! # Example
//!
//! ```rust
//! use surface_protocol::{Feature, FeatureCollection, Geometry};
//!
//! let ring = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
//! let collection = FeatureCollection::new()
//!     .with_feature(Feature::new(Geometry::polygon(vec![ring])));
//! assert_eq!(collection.len(), 1);
//! ```

pub mod geojson;
pub mod requests;
pub mod responses;

pub use geojson::{Feature, FeatureCollection, Geometry, Properties};
pub use requests::{LayerRequest, SizeLimits};
pub use responses::{
    ExceptionResponse, HealthResponse, LayerResponse, ResponseStatus, TemperatureResponse,
};
