//! Response → display model

use sismo_api::{AntecedentesReport, ApiResponse, EventRecord, ForecastReport};

use crate::model::{
    DateRange, DisplayModel, EventRow, ForecastView, HistoryView, LastEventView, MagnitudeBar,
    RiskTag, Severity, StatisticsView,
};
use crate::tab::TabId;

/// Shown when the request itself failed
pub const FAILURE_MESSAGE: &str = "Error al cargar los datos.";

pub const DISCLAIMER: &str = "Este pronóstico es una estimación basada en patrones históricos y no debe considerarse como una predicción exacta.";

/// Placeholder while a request for `tab` is in flight
pub fn loading(tab: TabId) -> DisplayModel {
    DisplayModel::Loading {
        tab,
        title: tab.heading().to_string(),
        message: tab.loading_message().to_string(),
    }
}

/// Generic transport/parse failure for `tab`
pub fn failure(tab: TabId) -> DisplayModel {
    error(tab, FAILURE_MESSAGE)
}

fn error(tab: TabId, message: &str) -> DisplayModel {
    DisplayModel::Error {
        tab,
        title: tab.heading().to_string(),
        message: message.to_string(),
    }
}

/// Render a decoded response for `tab`.
///
/// A response of the wrong kind for the tab renders as the generic failure.
pub fn render(tab: TabId, response: &ApiResponse) -> DisplayModel {
    match (tab, response) {
        (_, ApiResponse::Failure(f)) => error(tab, &f.error),
        (TabId::Antecedentes, ApiResponse::Antecedentes(r)) => {
            DisplayModel::Antecedentes(history(r))
        }
        (TabId::Estadisticas, ApiResponse::Antecedentes(r)) => {
            DisplayModel::Statistics(statistics(r))
        }
        (TabId::Pronostico, ApiResponse::Pronostico(f)) => DisplayModel::Forecast(forecast(f)),
        _ => failure(tab),
    }
}

/// Percentage width of a distribution bar; 0 when `total` is 0
pub fn bar_width(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

fn date_range(r: &AntecedentesReport) -> DateRange {
    DateRange {
        from: r.fecha_mas_antigua.clone(),
        to: r.fecha_mas_reciente.clone(),
    }
}

fn event_row(e: &EventRecord) -> EventRow {
    EventRow {
        fecha: e.fecha.clone(),
        magnitud: e.magnitud,
        profundidad_km: e.profundidad,
        coordinates: format!("{:.4}, {:.4}", e.latitud, e.longitud),
        severity: Severity::classify(e.magnitud),
    }
}

fn history(r: &AntecedentesReport) -> HistoryView {
    HistoryView {
        title: format!("{} de {}", TabId::Antecedentes.heading(), r.region),
        region: r.region.clone(),
        total_eventos: r.total_eventos,
        rows: r.eventos_recientes.iter().map(event_row).collect(),
        date_range: date_range(r),
    }
}

fn statistics(r: &AntecedentesReport) -> StatisticsView {
    let bars: Vec<MagnitudeBar> = r
        .distribucion_magnitudes
        .map(|d| {
            [
                ("4.0–4.9", d.low, "bar_low"),
                ("5.0–5.9", d.medium, "bar_medium"),
                ("6.0+", d.high, "bar_high"),
            ]
            .into_iter()
            .map(|(range, count, class)| MagnitudeBar {
                range: range.to_string(),
                count,
                width_pct: bar_width(count, r.total_eventos),
                class: class.to_string(),
            })
            .collect()
        })
        .unwrap_or_default();

    StatisticsView {
        title: format!("{} de {}", TabId::Estadisticas.heading(), r.region),
        region: r.region.clone(),
        total_eventos: r.total_eventos,
        magnitud_maxima: r.magnitud_maxima,
        magnitud_promedio: r.magnitud_promedio,
        profundidad_promedio_km: r.profundidad_promedio,
        bars,
        date_range: date_range(r),
    }
}

fn forecast(f: &ForecastReport) -> ForecastView {
    ForecastView {
        title: format!("{} para {}", TabId::Pronostico.heading(), f.region),
        region: f.region.clone(),
        fecha_estimada: f.fecha_estimada.clone(),
        hora_estimada: f.hora_estimada.clone(),
        magnitud_estimada: f.magnitud_estimada,
        profundidad_estimada_km: f.profundidad_estimada,
        risk: RiskTag::new(&f.probabilidad),
        total_eventos_historicos: f.total_eventos_historicos,
        intervalo_promedio_dias: f.intervalo_promedio_dias,
        ultimo_sismo: LastEventView {
            fecha: f.ultimo_sismo_registrado.fecha.clone(),
            magnitud: f.ultimo_sismo_registrado.magnitud,
            profundidad_km: f.ultimo_sismo_registrado.profundidad,
        },
        disclaimer: DISCLAIMER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sismo_api::{ApiFailure, LastEvent, MagnitudeDistribution};

    fn event(magnitud: f64) -> EventRecord {
        EventRecord {
            fecha: "2024-03-10 08:15:00".to_string(),
            magnitud,
            profundidad: 35.0,
            latitud: -12.04637,
            longitud: -77.04279,
            id: None,
        }
    }

    fn report(total: u64, dist: Option<MagnitudeDistribution>) -> AntecedentesReport {
        AntecedentesReport {
            region: "Lima".to_string(),
            total_eventos: total,
            eventos_recientes: vec![event(5.3), event(4.6), event(3.9)],
            fecha_mas_antigua: "1960-01-13".to_string(),
            fecha_mas_reciente: "2024-03-10".to_string(),
            magnitud_maxima: Some(7.9),
            magnitud_promedio: Some(4.6),
            profundidad_promedio: Some(48.2),
            distribucion_magnitudes: dist,
        }
    }

    fn forecast_report(probabilidad: &str) -> ForecastReport {
        ForecastReport {
            region: "Lima".to_string(),
            fecha_estimada: "2026-11-02".to_string(),
            hora_estimada: "14:21:09".to_string(),
            magnitud_estimada: 4.7,
            profundidad_estimada: 52.3,
            probabilidad: probabilidad.to_string(),
            total_eventos_historicos: 118,
            intervalo_promedio_dias: 21.4,
            ultimo_sismo_registrado: LastEvent {
                fecha: "2026-10-11 03:12:44".to_string(),
                magnitud: 4.5,
                profundidad: 60.0,
            },
        }
    }

    #[test]
    fn test_history_rows() {
        let model = render(
            TabId::Antecedentes,
            &ApiResponse::Antecedentes(report(3, None)),
        );
        let view = match model {
            DisplayModel::Antecedentes(v) => v,
            other => panic!("unexpected model: {:?}", other),
        };

        assert_eq!(view.title, "Antecedentes sísmicos de Lima");
        assert_eq!(view.total_eventos, 3);
        let severities: Vec<_> = view.rows.iter().map(|r| r.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::High, Severity::Medium, Severity::Low]
        );
        assert_eq!(view.rows[0].coordinates, "-12.0464, -77.0428");
        assert_eq!(view.date_range.from, "1960-01-13");
    }

    #[test]
    fn test_forecast_risk_tag() {
        let model = render(
            TabId::Pronostico,
            &ApiResponse::Pronostico(forecast_report("Alta")),
        );
        let view = match model {
            DisplayModel::Forecast(v) => v,
            other => panic!("unexpected model: {:?}", other),
        };

        assert_eq!(view.title, "Pronóstico sísmico para Lima");
        assert_eq!(view.risk.label, "Alta");
        assert_eq!(view.risk.class, "risk_alta");
        assert_eq!(view.ultimo_sismo.magnitud, 4.5);
        assert_eq!(view.disclaimer, DISCLAIMER);
    }

    #[test]
    fn test_bar_widths() {
        assert_eq!(bar_width(0, 10), 0.0);
        assert_eq!(bar_width(5, 10), 50.0);
        assert_eq!(bar_width(3, 0), 0.0);
        assert_eq!(bar_width(0, 0), 0.0);
        // Inconsistent server counts never exceed the full bar
        assert_eq!(bar_width(12, 10), 100.0);
    }

    #[test]
    fn test_statistics_bars() {
        let dist = MagnitudeDistribution {
            low: 7,
            medium: 2,
            high: 1,
        };
        let model = render(
            TabId::Estadisticas,
            &ApiResponse::Antecedentes(report(10, Some(dist))),
        );
        let view = match model {
            DisplayModel::Statistics(v) => v,
            other => panic!("unexpected model: {:?}", other),
        };

        assert_eq!(view.title, "Estadísticas de Lima");
        assert_eq!(view.bars.len(), 3);
        let widths: Vec<f64> = view.bars.iter().map(|b| b.width_pct).collect();
        assert_eq!(widths, vec![70.0, 20.0, 10.0]);
        let counted: u64 = view.bars.iter().map(|b| b.count).sum();
        assert_eq!(counted, view.total_eventos);
        assert_eq!(view.bars[2].class, "bar_high");
    }

    #[test]
    fn test_statistics_with_zero_total() {
        let model = render(
            TabId::Estadisticas,
            &ApiResponse::Antecedentes(report(0, Some(MagnitudeDistribution::default()))),
        );
        let view = match model {
            DisplayModel::Statistics(v) => v,
            other => panic!("unexpected model: {:?}", other),
        };
        assert!(view.bars.iter().all(|b| b.width_pct == 0.0));
    }

    #[test]
    fn test_statistics_without_distribution() {
        let model = render(
            TabId::Estadisticas,
            &ApiResponse::Antecedentes(report(10, None)),
        );
        match model {
            DisplayModel::Statistics(v) => assert!(v.bars.is_empty()),
            other => panic!("unexpected model: {:?}", other),
        }
    }

    #[test]
    fn test_payload_error_message_verbatim() {
        let resp = ApiResponse::Failure(ApiFailure {
            error: "Región no encontrada".to_string(),
            region: Some("Ica".to_string()),
        });

        for tab in [TabId::Antecedentes, TabId::Estadisticas] {
            let model = render(tab, &resp);
            assert_eq!(model.tab(), tab);
            assert_eq!(model.error_message(), Some("Región no encontrada"));
        }
    }

    #[test]
    fn test_mismatched_kind_is_generic_failure() {
        let model = render(
            TabId::Estadisticas,
            &ApiResponse::Pronostico(forecast_report("Baja")),
        );
        assert_eq!(model.error_message(), Some(FAILURE_MESSAGE));
        assert_eq!(model.title(), "Estadísticas");
    }

    #[test]
    fn test_render_is_deterministic() {
        let resp = ApiResponse::Pronostico(forecast_report("Media"));
        assert_eq!(
            render(TabId::Pronostico, &resp),
            render(TabId::Pronostico, &resp)
        );
    }

    #[test]
    fn test_loading_placeholder() {
        let model = loading(TabId::Estadisticas);
        assert!(model.is_loading());
        assert_eq!(model.tab(), TabId::Estadisticas);
        assert_eq!(model.title(), "Estadísticas");
    }
}
