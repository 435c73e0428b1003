//! Error types for surface-layers services.

use thiserror::Error;

/// Result type alias using SurfaceError.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Primary error type for request-level failures.
///
/// Feature-level problems (a relation without an outer ring, a ring with too
/// few vertices) are reported through `GeometryError` but never abort a
/// request; see `landcover::GeometryError`.
#[derive(Debug, Clone, Error)]
pub enum SurfaceError {
    // === Request Errors ===
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // === Data Source Errors ===
    #[error("Data source timed out: {0}")]
    DataSourceTimeout(String),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Partial fetch failure: {0}")]
    PartialFetchFailure(String),

    // === Data Errors ===
    /// Status mapping (422) for geometry failures. Per-feature failures
    /// never use it: the assembler records them as dropped features.
    #[error("Invalid geometry: {0}")]
    GeometryError(String),

    #[error("No data: {0}")]
    NoData(String),

    // === Infrastructure Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SurfaceError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::DataSourceTimeout(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::DataSourceUnavailable(msg.into())
    }

    pub fn no_data(msg: impl Into<String>) -> Self {
        Self::NoData(msg.into())
    }

    /// Stable machine-readable code, used in error bodies and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            SurfaceError::InvalidRequest(_) => "InvalidRequest",
            SurfaceError::DataSourceTimeout(_) => "DataSourceTimeout",
            SurfaceError::DataSourceUnavailable(_) => "DataSourceUnavailable",
            SurfaceError::PartialFetchFailure(_) => "PartialFetchFailure",
            SurfaceError::GeometryError(_) => "GeometryError",
            SurfaceError::NoData(_) => "NoDataError",
            SurfaceError::Internal(_) => "InternalError",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            SurfaceError::InvalidRequest(_) => 400,
            SurfaceError::NoData(_) => 404,
            SurfaceError::GeometryError(_) => 422,
            SurfaceError::PartialFetchFailure(_) => 502,
            SurfaceError::DataSourceUnavailable(_) => 503,
            SurfaceError::DataSourceTimeout(_) => 504,
            SurfaceError::Internal(_) => 500,
        }
    }
}

impl From<serde_json::Error> for SurfaceError {
    fn from(err: serde_json::Error) -> Self {
        SurfaceError::Internal(format!("JSON error: {}", err))
    }
}
