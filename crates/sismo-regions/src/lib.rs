//! Sismo Regions
//!
//! Owns the region shapes loaded from a GeoJSON feature collection and turns
//! a click on a shape into a `RegionSelected` occurrence on a typed bus.
//! Geometry never leaves this crate; everyone else sees region names.

mod bus;
mod dataset;
mod error;
mod geometry;
mod selector;

pub use bus::{RegionBus, RegionSelected};
pub use dataset::{Region, RegionDataset, DEFAULT_NAME_PROPERTY};
pub use error::RegionError;
pub use selector::RegionSelector;

pub type Result<T> = std::result::Result<T, RegionError>;
