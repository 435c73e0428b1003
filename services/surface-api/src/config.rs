//! Service configuration loading and types.
//!
//! Sources, in increasing precedence: built-in defaults, an optional YAML
//! file, then environment variables.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use surface_protocol::SizeLimits;
use thermal::{BandCalibration, SelectionPolicy};

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default)]
    pub overpass: OverpassConfig,

    #[serde(default)]
    pub imagery: ImageryConfig,

    #[serde(default)]
    pub thermal: ThermalConfig,

    #[serde(default)]
    pub cors: CorsConfig,

    /// Accepted `size_km` range for both products.
    #[serde(default)]
    pub limits: SizeLimits,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            overpass: OverpassConfig::default(),
            imagery: ImageryConfig::default(),
            thermal: ThermalConfig::default(),
            cors: CorsConfig::default(),
            limits: SizeLimits::default(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

/// Vector feature source (Overpass mirrors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Mirrors, tried in order until one answers.
    #[serde(default = "default_overpass_urls")]
    pub urls: Vec<String>,

    /// Budget for one query across all mirrors.
    #[serde(default = "default_overpass_timeout_secs")]
    pub timeout_secs: u64,

    /// Budget for a single mirror attempt; also sent as the QL
    /// `[timeout:..]` setting. At most `timeout_secs`.
    #[serde(default = "default_overpass_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            urls: default_overpass_urls(),
            timeout_secs: default_overpass_timeout_secs(),
            attempt_timeout_secs: default_overpass_attempt_timeout_secs(),
        }
    }
}

impl OverpassConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }
}

fn default_overpass_urls() -> Vec<String> {
    vec![
        "https://overpass-api.de/api/interpreter".to_string(),
        "https://overpass.kumi.systems/api/interpreter".to_string(),
        "https://overpass.nchc.org.tw/api/interpreter".to_string(),
    ]
}

fn default_overpass_timeout_secs() -> u64 {
    90
}

fn default_overpass_attempt_timeout_secs() -> u64 {
    30
}

/// Thermal imagery source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageryConfig {
    #[serde(default = "default_imagery_base_url")]
    pub base_url: String,

    /// Thermal band requested from the source; must have a known calibration.
    #[serde(default = "default_band")]
    pub band: String,

    #[serde(default = "default_imagery_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ImageryConfig {
    fn default() -> Self {
        Self {
            base_url: default_imagery_base_url(),
            band: default_band(),
            timeout_secs: default_imagery_timeout_secs(),
        }
    }
}

impl ImageryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn calibration(&self) -> Option<BandCalibration> {
        BandCalibration::for_band(&self.band)
    }
}

fn default_imagery_base_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_band() -> String {
    "ST_B10".to_string()
}

fn default_imagery_timeout_secs() -> u64 {
    60
}

/// Scene selection and gridding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalConfig {
    #[serde(default = "default_lookback_months")]
    pub lookback_months: u32,

    /// Inclusive cloud-cover ceiling, percent.
    #[serde(default = "default_max_cloud_cover")]
    pub max_cloud_cover: f64,

    /// Grid cell edge length, meters.
    #[serde(default = "default_cell_size_m")]
    pub cell_size_m: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            lookback_months: default_lookback_months(),
            max_cloud_cover: default_max_cloud_cover(),
            cell_size_m: default_cell_size_m(),
        }
    }
}

impl ThermalConfig {
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            lookback_months: self.lookback_months,
            max_cloud_cover: self.max_cloud_cover,
        }
    }
}

fn default_lookback_months() -> u32 {
    6
}

fn default_max_cloud_cover() -> f64 {
    20.0
}

fn default_cell_size_m() -> f64 {
    50.0
}

/// Cross-origin access for browser clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `*` allows any.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl ServiceConfig {
    /// Load configuration: optional YAML file, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ServiceConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        tracing::info!(path = ?path, "Loaded service configuration");
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production). Unparseable numeric values are an error.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SURFACE_LISTEN_ADDR") {
            self.listen_addr = val;
        }

        if let Some(val) = lookup("OVERPASS_URLS") {
            self.overpass.urls = split_list(&val);
        }

        if let Some(val) = lookup("OVERPASS_TIMEOUT_SECS") {
            self.overpass.timeout_secs = parse_var("OVERPASS_TIMEOUT_SECS", &val)?;
        }

        if let Some(val) = lookup("OVERPASS_ATTEMPT_TIMEOUT_SECS") {
            self.overpass.attempt_timeout_secs =
                parse_var("OVERPASS_ATTEMPT_TIMEOUT_SECS", &val)?;
        }

        if let Some(val) = lookup("ALLOWED_ORIGINS") {
            let origins = split_list(&val);
            self.cors.allowed_origins = if origins.is_empty() {
                default_allowed_origins()
            } else {
                origins
            };
        }

        if let Some(val) = lookup("IMAGERY_BASE_URL") {
            self.imagery.base_url = val;
        }

        if let Some(val) = lookup("IMAGERY_BAND") {
            self.imagery.band = val;
        }

        if let Some(val) = lookup("IMAGERY_TIMEOUT_SECS") {
            self.imagery.timeout_secs = parse_var("IMAGERY_TIMEOUT_SECS", &val)?;
        }

        if let Some(val) = lookup("THERMAL_LOOKBACK_MONTHS") {
            self.thermal.lookback_months = parse_var("THERMAL_LOOKBACK_MONTHS", &val)?;
        }

        if let Some(val) = lookup("THERMAL_MAX_CLOUD_COVER") {
            self.thermal.max_cloud_cover = parse_var("THERMAL_MAX_CLOUD_COVER", &val)?;
        }

        if let Some(val) = lookup("THERMAL_CELL_SIZE_M") {
            self.thermal.cell_size_m = parse_var("THERMAL_CELL_SIZE_M", &val)?;
        }

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.overpass.urls.is_empty() {
            bail!("overpass.urls must list at least one mirror");
        }

        if self.overpass.timeout_secs == 0 {
            bail!("overpass.timeout_secs must be > 0");
        }

        if self.overpass.attempt_timeout_secs == 0
            || self.overpass.attempt_timeout_secs > self.overpass.timeout_secs
        {
            bail!(
                "overpass.attempt_timeout_secs must be within [1, {}], got {}",
                self.overpass.timeout_secs,
                self.overpass.attempt_timeout_secs
            );
        }

        match Url::parse(&self.imagery.base_url) {
            Ok(url) if !url.cannot_be_a_base() => {}
            _ => bail!("imagery.base_url is not a valid HTTP base URL: {:?}", self.imagery.base_url),
        }

        if self.imagery.timeout_secs == 0 {
            bail!("imagery.timeout_secs must be > 0");
        }

        if self.imagery.calibration().is_none() {
            bail!("imagery.band {:?} has no known calibration", self.imagery.band);
        }

        if !(0.0..=100.0).contains(&self.thermal.max_cloud_cover) {
            bail!(
                "thermal.max_cloud_cover must be within [0, 100], got {}",
                self.thermal.max_cloud_cover
            );
        }

        if !self.thermal.cell_size_m.is_finite() || self.thermal.cell_size_m <= 0.0 {
            bail!("thermal.cell_size_m must be > 0");
        }

        if self.cors.allowed_origins.is_empty() {
            bail!("cors.allowed_origins must not be empty; use \"*\" to allow any origin");
        }

        if !self.cors.allows_any_origin() {
            for origin in &self.cors.allowed_origins {
                if HeaderValue::from_str(origin).is_err() {
                    bail!("cors.allowed_origins has an invalid origin: {:?}", origin);
                }
            }
        }

        let limits = &self.limits;
        if !(limits.min_size_km > 0.0 && limits.min_size_km <= limits.max_size_km) {
            bail!(
                "limits must satisfy 0 < min_size_km <= max_size_km, got [{}, {}]",
                limits.min_size_km,
                limits.max_size_km
            );
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, val: &str) -> Result<T> {
    val.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{} has an invalid value: {:?}", key, val))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:8000");
        assert_eq!(config.overpass.urls.len(), 3);
        assert_eq!(config.overpass.timeout(), Duration::from_secs(90));
        assert_eq!(config.overpass.attempt_timeout(), Duration::from_secs(30));
        assert!(config.cors.allows_any_origin());
        assert_eq!(config.imagery.band, "ST_B10");
        assert_eq!(config.thermal.selection_policy(), SelectionPolicy::default());
        assert_eq!(config.thermal.cell_size_m, 50.0);
        assert_eq!(config.limits, SizeLimits::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "thermal:\n  max_cloud_cover: 10\nimagery:\n  base_url: http://imagery:9000"
        )
        .unwrap();

        let config = ServiceConfig::from_file(file.path()).unwrap();
        assert_eq!(config.thermal.max_cloud_cover, 10.0);
        assert_eq!(config.thermal.lookback_months, 6);
        assert_eq!(config.imagery.base_url, "http://imagery:9000");
        assert_eq!(config.imagery.band, "ST_B10");
        assert_eq!(config.overpass, OverpassConfig::default());
        assert_eq!(config.cors, CorsConfig::default());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(ServiceConfig::from_file(Path::new("/nonexistent/surface.yaml")).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = ServiceConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("OVERPASS_URLS", "http://a/api, http://b/api,"),
                ("OVERPASS_TIMEOUT_SECS", "30"),
                ("THERMAL_CELL_SIZE_M", "100"),
            ]))
            .unwrap();
        assert_eq!(config.overpass.urls, vec!["http://a/api", "http://b/api"]);
        assert_eq!(config.overpass.timeout_secs, 30);
        assert_eq!(config.thermal.cell_size_m, 100.0);
    }

    #[test]
    fn test_allowed_origins_override() {
        let mut config = ServiceConfig::default();
        config
            .apply_overrides(lookup_from(&[(
                "ALLOWED_ORIGINS",
                "https://maps.example.org, http://localhost:3000",
            )]))
            .unwrap();
        assert_eq!(
            config.cors.allowed_origins,
            vec!["https://maps.example.org", "http://localhost:3000"]
        );
        assert!(!config.cors.allows_any_origin());
        assert!(config.validate().is_ok());

        config
            .apply_overrides(lookup_from(&[("ALLOWED_ORIGINS", " ")]))
            .unwrap();
        assert!(config.cors.allows_any_origin());
    }

    #[test]
    fn test_attempt_timeout_override() {
        let mut config = ServiceConfig::default();
        config
            .apply_overrides(lookup_from(&[
                ("OVERPASS_TIMEOUT_SECS", "20"),
                ("OVERPASS_ATTEMPT_TIMEOUT_SECS", "8"),
            ]))
            .unwrap();
        assert_eq!(config.overpass.attempt_timeout(), Duration::from_secs(8));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_override_is_error() {
        let mut config = ServiceConfig::default();
        let result = config.apply_overrides(lookup_from(&[("IMAGERY_TIMEOUT_SECS", "soon")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rules() {
        let mut config = ServiceConfig::default();
        config.thermal.max_cloud_cover = 120.0;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.overpass.urls.clear();
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.imagery.band = "B4".to_string();
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.thermal.cell_size_m = 0.0;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.limits.min_size_km = 20.0;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.overpass.attempt_timeout_secs = config.overpass.timeout_secs + 1;
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.cors.allowed_origins = vec!["https://ok.example".into(), "bad\norigin".into()];
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.cors.allowed_origins.clear();
        assert!(config.validate().is_err());

        let mut config = ServiceConfig::default();
        config.imagery.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
