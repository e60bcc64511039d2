//! GeoJSON region dataset

use serde::Serialize;
use std::path::Path;

use crate::error::RegionError;
use crate::Result;

/// Feature property holding the department name in the GADM level-1 export
pub const DEFAULT_NAME_PROPERTY: &str = "NAME_1";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    /// Stable region name, also used for API lookups
    pub id: String,
    /// Raw GeoJSON geometry; only the selector interprets it
    #[serde(skip)]
    pub(crate) geometry: serde_json::Value,
}

impl Region {
    pub fn new(id: impl Into<String>, geometry: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            geometry,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegionDataset {
    regions: Vec<Region>,
}

impl RegionDataset {
    /// Parse a FeatureCollection. Features without a usable name are skipped.
    pub fn from_geojson(json: &str, name_property: &str) -> Result<Self> {
        let doc: serde_json::Value = serde_json::from_str(json)?;

        let features = doc
            .get("features")
            .and_then(|f| f.as_array())
            .ok_or_else(|| {
                RegionError::InvalidDataset("missing \"features\" array".to_string())
            })?;

        let mut regions: Vec<Region> = Vec::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            let name = feature
                .get("properties")
                .and_then(|p| p.get(name_property))
                .and_then(|n| n.as_str())
                .map(str::trim)
                .filter(|n| !n.is_empty());

            let Some(name) = name else {
                tracing::warn!(index, property = %name_property, "Skipping feature without a name");
                continue;
            };

            if regions.iter().any(|r| r.id == name) {
                tracing::warn!(region = %name, "Duplicate region name, keeping the first");
                continue;
            }

            let geometry = feature
                .get("geometry")
                .cloned()
                .unwrap_or(serde_json::Value::Null);
            regions.push(Region::new(name, geometry));
        }

        tracing::debug!(count = regions.len(), "Parsed region dataset");

        Ok(Self { regions })
    }

    pub fn load<P: AsRef<Path>>(path: P, name_property: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_geojson(&json, name_property)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn into_regions(self) -> Vec<Region> {
        self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
