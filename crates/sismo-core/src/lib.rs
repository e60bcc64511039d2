//! Sismo Core
//!
//! Composition root for the seismic dashboard: configuration, logging, and
//! the [`Dashboard`] that connects the region selector to the tab controller
//! through the `RegionSelected` bus.

mod config;
mod dashboard;
mod error;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::CoreError;

// Re-export core components
pub use sismo_api::{ApiResponse, DataClient, FetchError, HttpDataClient, ResourceKind};
pub use sismo_regions::{Region, RegionBus, RegionDataset, RegionError, RegionSelected, RegionSelector};
pub use sismo_render::{DisplayModel, PlainText, Present, TabId};
pub use sismo_tabs::{ContentView, ReselectPolicy, TabBar, TabController, TabError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
