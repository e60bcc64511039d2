//! Sismo Content Renderer
//!
//! Maps API responses to a typed [`DisplayModel`]. Rendering is pure: no
//! network, no shared state, same input → same output. Turning a model into
//! something visible is a separate [`Present`] step.

mod model;
mod present;
mod render;
mod tab;

pub use model::{
    DateRange, DisplayModel, EventRow, ForecastView, HistoryView, LastEventView, MagnitudeBar,
    RiskTag, Severity, StatisticsView,
};
pub use present::{PlainText, Present};
pub use render::{bar_width, failure, loading, render, DISCLAIMER, FAILURE_MESSAGE};
pub use tab::TabId;
