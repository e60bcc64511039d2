//! Response payloads
//!
//! Field names follow the backend's JSON verbatim.

use serde::{Deserialize, Serialize};

use crate::kind::ResourceKind;

/// One historical event, most-recent-first in `eventos_recientes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Timestamp as sent by the server (`YYYY-MM-DD HH:MM:SS`)
    pub fecha: String,
    pub magnitud: f64,
    /// Depth in km
    pub profundidad: f64,
    pub latitud: f64,
    pub longitud: f64,
    /// Catalogue id; the backend sends whatever the dataset holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
}

/// Event counts per magnitude bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagnitudeDistribution {
    #[serde(rename = "4.0-4.9")]
    pub low: u64,
    #[serde(rename = "5.0-5.9")]
    pub medium: u64,
    #[serde(rename = "6.0+")]
    pub high: u64,
}

impl MagnitudeDistribution {
    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high
    }
}

/// `GET /api/antecedentes/{region}`
///
/// The statistics view reads the aggregate fields; the history view ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntecedentesReport {
    pub region: String,
    pub total_eventos: u64,
    pub eventos_recientes: Vec<EventRecord>,
    pub fecha_mas_antigua: String,
    pub fecha_mas_reciente: String,
    #[serde(default)]
    pub magnitud_maxima: Option<f64>,
    #[serde(default)]
    pub magnitud_promedio: Option<f64>,
    #[serde(default)]
    pub profundidad_promedio: Option<f64>,
    #[serde(default)]
    pub distribucion_magnitudes: Option<MagnitudeDistribution>,
}

/// Last event summarised inside a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastEvent {
    pub fecha: String,
    pub magnitud: f64,
    pub profundidad: f64,
}

/// `GET /api/pronostico/{region}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub region: String,
    pub fecha_estimada: String,
    pub hora_estimada: String,
    pub magnitud_estimada: f64,
    pub profundidad_estimada: f64,
    /// Risk level label, e.g. "Alta", "Media", "Baja"
    pub probabilidad: String,
    pub total_eventos_historicos: u64,
    pub intervalo_promedio_dias: f64,
    pub ultimo_sismo_registrado: LastEvent,
}

/// Recoverable condition reported inside an otherwise successful response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    pub error: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// A decoded response for one resource kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ApiResponse {
    Antecedentes(AntecedentesReport),
    Pronostico(ForecastReport),
    Failure(ApiFailure),
}

impl ApiResponse {
    /// Kind of the data carried, `None` for a payload-level failure
    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            ApiResponse::Antecedentes(_) => Some(ResourceKind::Antecedentes),
            ApiResponse::Pronostico(_) => Some(ResourceKind::Pronostico),
            ApiResponse::Failure(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ApiResponse::Failure(_))
    }
}
