//! Display model
//!
//! Structured content for the content area. Nothing here knows about markup.

use serde::{Deserialize, Serialize};

use crate::tab::TabId;

/// Magnitude severity, fixed thresholds with inclusive lower bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn classify(magnitude: f64) -> Self {
        if magnitude >= 5.0 {
            Severity::High
        } else if magnitude >= 4.5 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// Style class used by the page
    pub fn class(&self) -> &'static str {
        match self {
            Severity::High => "mag-high",
            Severity::Medium => "mag-medium",
            Severity::Low => "mag-low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRow {
    pub fecha: String,
    pub magnitud: f64,
    pub profundidad_km: f64,
    /// `lat, lon` with four decimals
    pub coordinates: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    pub title: String,
    pub region: String,
    pub total_eventos: u64,
    /// Most recent first, as received
    pub rows: Vec<EventRow>,
    pub date_range: DateRange,
}

/// Risk label kept verbatim; only the style class is case-normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskTag {
    pub label: String,
    pub class: String,
}

impl RiskTag {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            class: format!("risk_{}", label.trim().to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastEventView {
    pub fecha: String,
    pub magnitud: f64,
    pub profundidad_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastView {
    pub title: String,
    pub region: String,
    pub fecha_estimada: String,
    pub hora_estimada: String,
    pub magnitud_estimada: f64,
    pub profundidad_estimada_km: f64,
    pub risk: RiskTag,
    pub total_eventos_historicos: u64,
    pub intervalo_promedio_dias: f64,
    pub ultimo_sismo: LastEventView,
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeBar {
    /// Bucket label, e.g. `4.0–4.9`
    pub range: String,
    pub count: u64,
    /// Always finite, within `[0, 100]`
    pub width_pct: f64,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsView {
    pub title: String,
    pub region: String,
    pub total_eventos: u64,
    pub magnitud_maxima: Option<f64>,
    pub magnitud_promedio: Option<f64>,
    pub profundidad_promedio_km: Option<f64>,
    /// Three buckets when the server sent a distribution, empty otherwise
    pub bars: Vec<MagnitudeBar>,
    pub date_range: DateRange,
}

/// What the content area shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DisplayModel {
    Loading {
        tab: TabId,
        title: String,
        message: String,
    },
    Antecedentes(HistoryView),
    Forecast(ForecastView),
    Statistics(StatisticsView),
    Error {
        tab: TabId,
        title: String,
        message: String,
    },
}

impl DisplayModel {
    pub fn tab(&self) -> TabId {
        match self {
            DisplayModel::Loading { tab, .. } | DisplayModel::Error { tab, .. } => *tab,
            DisplayModel::Antecedentes(_) => TabId::Antecedentes,
            DisplayModel::Forecast(_) => TabId::Pronostico,
            DisplayModel::Statistics(_) => TabId::Estadisticas,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            DisplayModel::Loading { title, .. } | DisplayModel::Error { title, .. } => title,
            DisplayModel::Antecedentes(v) => &v.title,
            DisplayModel::Forecast(v) => &v.title,
            DisplayModel::Statistics(v) => &v.title,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayModel::Loading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DisplayModel::Error { .. })
    }

    /// Error text, if this is the error variant
    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayModel::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}
