//! Dashboard configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use sismo_regions::DEFAULT_NAME_PROPERTY;
use sismo_tabs::ReselectPolicy;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend serving `/api/antecedentes` and `/api/pronostico`
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// GeoJSON feature collection of the regions
    pub dataset_path: PathBuf,
    /// Feature property holding the region name
    pub region_name_property: String,
    pub reselect_policy: ReselectPolicy,
    /// Buffered `RegionSelected` messages per subscriber
    pub bus_capacity: usize,
}

impl Config {
    /// Load from a JSON file. A missing file yields the defaults.
    /// Environment overrides are applied last.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply `SISMO_API_BASE`, `SISMO_DATASET` and `SISMO_TIMEOUT_SECS`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base) = lookup("SISMO_API_BASE") {
            self.api_base_url = base;
        }
        if let Some(path) = lookup("SISMO_DATASET") {
            self.dataset_path = PathBuf::from(path);
        }
        if let Some(secs) = lookup("SISMO_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => tracing::warn!(value = %secs, "Ignoring invalid SISMO_TIMEOUT_SECS"),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.api_base()?;
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.region_name_property.trim().is_empty() {
            return Err(CoreError::Config(
                "region_name_property cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn api_base(&self) -> Result<Url> {
        Url::parse(&self.api_base_url)
            .map_err(|e| CoreError::Config(format!("api_base_url {}: {}", self.api_base_url, e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 10,
            user_agent: concat!("sismo-dash/", env!("CARGO_PKG_VERSION")).to_string(),
            dataset_path: PathBuf::from("static/geojson/peru.json"),
            region_name_property: DEFAULT_NAME_PROPERTY.to_string(),
            reselect_policy: ReselectPolicy::default(),
            bus_capacity: 16,
        }
    }
}
