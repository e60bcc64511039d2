//! Resource kinds and their endpoint templates

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FetchError;
use crate::Result;

/// Logical category of data a tab requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Historical events plus aggregate statistics
    Antecedentes,
    /// Next-event forecast
    Pronostico,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Antecedentes => "antecedentes",
            ResourceKind::Pronostico => "pronostico",
        }
    }

    /// Build `{base}/api/{kind}/{region}`.
    ///
    /// The region goes in as a single path segment, so spaces and accents
    /// are percent-encoded and a `/` in the name cannot escape the template.
    pub fn endpoint(&self, base: &Url, region: &str) -> Result<Url> {
        if region.trim().is_empty() {
            return Err(FetchError::InvalidUrl("region cannot be empty".to_string()));
        }

        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(format!("{} cannot be a base", base)))?;
            segments
                .pop_if_empty()
                .push("api")
                .push(self.as_str())
                .push(region);
        }
        Ok(url)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "antecedentes" => Ok(ResourceKind::Antecedentes),
            "pronostico" => Ok(ResourceKind::Pronostico),
            _ => Err(format!("Unknown resource kind: {}", s)),
        }
    }
}
