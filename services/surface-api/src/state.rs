//! Application state for the surface API.

use std::sync::Arc;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::ServiceConfig;
use crate::sources::{HttpImageryClient, OverpassClient, ThermalImagerySource, VectorFeatureSource};

/// Shared application state. Read-only after startup.
pub struct AppState {
    pub config: ServiceConfig,

    /// Vector features for the land-cover product.
    pub vector_source: Arc<dyn VectorFeatureSource>,

    /// Thermal scenes for the temperature product.
    pub imagery_source: Arc<dyn ThermalImagerySource>,

    /// Renders the `/metrics` endpoint.
    pub prometheus: PrometheusHandle,
}

impl AppState {
    /// Create state with the production HTTP clients.
    pub fn new(config: ServiceConfig, prometheus: PrometheusHandle) -> Result<Self> {
        let vector_source = OverpassClient::new(&config.overpass)
            .context("Failed to create Overpass client")?;
        let imagery_source = HttpImageryClient::new(&config.imagery)
            .context("Failed to create imagery client")?;

        Ok(Self::with_sources(
            config,
            Arc::new(vector_source),
            Arc::new(imagery_source),
            prometheus,
        ))
    }

    /// Create state around arbitrary sources.
    pub fn with_sources(
        config: ServiceConfig,
        vector_source: Arc<dyn VectorFeatureSource>,
        imagery_source: Arc<dyn ThermalImagerySource>,
        prometheus: PrometheusHandle,
    ) -> Self {
        Self {
            config,
            vector_source,
            imagery_source,
            prometheus,
        }
    }
}
