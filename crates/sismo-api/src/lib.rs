//! Sismo API Client
//!
//! Fetches region-scoped seismic data from the dashboard backend:
//! - `GET /api/antecedentes/{region}` → historical events and statistics
//! - `GET /api/pronostico/{region}` → next-event forecast
//!
//! The client knows nothing about tabs or presentation. A `{ "error": .. }`
//! body is a payload-level failure, not a transport failure.

mod client;
mod error;
mod kind;
mod payload;

pub use client::{decode, DataClient, HttpDataClient};
pub use error::FetchError;
pub use kind::ResourceKind;
pub use payload::{
    AntecedentesReport, ApiFailure, ApiResponse, EventRecord, ForecastReport, LastEvent,
    MagnitudeDistribution,
};

pub type Result<T> = std::result::Result<T, FetchError>;
