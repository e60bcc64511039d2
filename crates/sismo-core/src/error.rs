//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("API error: {0}")]
    Api(#[from] sismo_api::FetchError),

    #[error("Region error: {0}")]
    Region(#[from] sismo_regions::RegionError),

    #[error("Tab error: {0}")]
    Tab(#[from] sismo_tabs::TabError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Timed out waiting for content")]
    Timeout,

    #[error("Event loop stopped")]
    Stopped,
}
