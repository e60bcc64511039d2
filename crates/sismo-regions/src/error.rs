//! Region dataset error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
}
