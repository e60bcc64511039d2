//! The fixed set of dashboard tabs

use serde::{Deserialize, Serialize};
use sismo_api::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabId {
    /// Recent historical events
    Antecedentes,
    /// Next-event forecast
    Pronostico,
    /// Aggregates and magnitude distribution
    Estadisticas,
}

impl TabId {
    pub const ALL: [TabId; 3] = [TabId::Antecedentes, TabId::Pronostico, TabId::Estadisticas];

    /// Activated on the first region selection
    pub const DEFAULT: TabId = TabId::Pronostico;

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            TabId::Antecedentes => "Antecedentes",
            TabId::Pronostico => "Pronóstico",
            TabId::Estadisticas => "Estadísticas",
        }
    }

    /// Content-area heading before a region name is known
    pub fn heading(&self) -> &'static str {
        match self {
            TabId::Antecedentes => "Antecedentes sísmicos",
            TabId::Pronostico => "Pronóstico sísmico",
            TabId::Estadisticas => "Estadísticas",
        }
    }

    pub fn loading_message(&self) -> &'static str {
        match self {
            TabId::Antecedentes => "Cargando antecedentes...",
            TabId::Pronostico => "Cargando pronóstico...",
            TabId::Estadisticas => "Cargando estadísticas...",
        }
    }

    /// Statistics are computed from the historical endpoint
    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            TabId::Antecedentes | TabId::Estadisticas => ResourceKind::Antecedentes,
            TabId::Pronostico => ResourceKind::Pronostico,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabId::Antecedentes => "antecedentes",
            TabId::Pronostico => "pronostico",
            TabId::Estadisticas => "estadisticas",
        }
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TabId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "antecedentes" => Ok(TabId::Antecedentes),
            "pronostico" | "pronóstico" => Ok(TabId::Pronostico),
            "estadisticas" | "estadísticas" => Ok(TabId::Estadisticas),
            _ => Err(format!("Unknown tab: {}", s)),
        }
    }
}
