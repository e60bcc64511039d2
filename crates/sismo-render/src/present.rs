//! Presentation step
//!
//! A [`Present`] turns a display model into something a surface can show.
//! The controller never depends on one, so surfaces are swappable.

use crate::model::{DisplayModel, ForecastView, HistoryView, StatisticsView};

pub trait Present {
    type Output;

    fn present(&self, model: &DisplayModel) -> Self::Output;
}

/// Terminal-friendly text
#[derive(Debug, Clone, Copy)]
pub struct PlainText {
    /// Character width of a 100% bar
    pub bar_columns: usize,
}

impl Default for PlainText {
    fn default() -> Self {
        Self { bar_columns: 20 }
    }
}

impl Present for PlainText {
    type Output = String;

    fn present(&self, model: &DisplayModel) -> String {
        let mut out = String::new();
        out.push_str(model.title());
        out.push('\n');

        match model {
            DisplayModel::Loading { message, .. } => push_line(&mut out, message),
            DisplayModel::Error { message, .. } => push_line(&mut out, &format!("! {}", message)),
            DisplayModel::Antecedentes(v) => self.history(&mut out, v),
            DisplayModel::Forecast(v) => self.forecast(&mut out, v),
            DisplayModel::Statistics(v) => self.statistics(&mut out, v),
        }

        out
    }
}

impl PlainText {
    fn history(&self, out: &mut String, v: &HistoryView) {
        push_line(out, &format!("Total de eventos registrados: {}", v.total_eventos));
        for row in &v.rows {
            push_line(
                out,
                &format!(
                    "  {}  M{:<4} [{:<6}]  {} km  ({})",
                    row.fecha, row.magnitud, row.severity, row.profundidad_km, row.coordinates
                ),
            );
        }
        push_line(
            out,
            &format!("Rango de datos: {} a {}", v.date_range.from, v.date_range.to),
        );
    }

    fn forecast(&self, out: &mut String, v: &ForecastView) {
        push_line(out, &format!("Fecha estimada: {}", v.fecha_estimada));
        push_line(out, &format!("Hora estimada: {}", v.hora_estimada));
        push_line(out, &format!("Magnitud probable: {} Mw", v.magnitud_estimada));
        push_line(
            out,
            &format!("Profundidad estimada: {} km", v.profundidad_estimada_km),
        );
        push_line(out, &format!("Nivel de riesgo: {}", v.risk.label));
        push_line(
            out,
            &format!("Total de eventos registrados: {}", v.total_eventos_historicos),
        );
        push_line(
            out,
            &format!(
                "Intervalo promedio entre sismos: {} días",
                v.intervalo_promedio_dias
            ),
        );
        push_line(
            out,
            &format!(
                "Último sismo registrado: {} | {} Mw | {} km",
                v.ultimo_sismo.fecha, v.ultimo_sismo.magnitud, v.ultimo_sismo.profundidad_km
            ),
        );
        push_line(out, &v.disclaimer);
    }

    fn statistics(&self, out: &mut String, v: &StatisticsView) {
        push_line(out, &format!("Total de eventos: {}", v.total_eventos));
        if let Some(m) = v.magnitud_maxima {
            push_line(out, &format!("Magnitud máxima: {} Mw", m));
        }
        if let Some(m) = v.magnitud_promedio {
            push_line(out, &format!("Magnitud promedio: {} Mw", m));
        }
        if let Some(d) = v.profundidad_promedio_km {
            push_line(out, &format!("Profundidad promedio: {} km", d));
        }
        for bar in &v.bars {
            let filled = (bar.width_pct / 100.0 * self.bar_columns as f64).round() as usize;
            let filled = filled.min(self.bar_columns);
            push_line(
                out,
                &format!(
                    "  {:<8} {}{} {}",
                    bar.range,
                    "#".repeat(filled),
                    ".".repeat(self.bar_columns - filled),
                    bar.count
                ),
            );
        }
        push_line(
            out,
            &format!("Rango de datos: {} a {}", v.date_range.from, v.date_range.to),
        );
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
