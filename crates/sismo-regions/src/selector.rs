//! Region selector
//!
//! Stands in for the map surface: each region is a clickable shape, and a
//! click announces `RegionSelected` synchronously. No network involved.

use parking_lot::RwLock;

use crate::bus::{RegionBus, RegionSelected};
use crate::dataset::{Region, RegionDataset};
use crate::geometry;
use crate::Result;

pub struct RegionSelector {
    regions: Vec<Region>,
    bus: RegionBus,
    /// Heading shown above the tabs
    heading: RwLock<Option<String>>,
}

impl RegionSelector {
    /// Build the selector from a loaded dataset.
    ///
    /// A failed load leaves the selector empty: nothing renders and nothing
    /// can be selected, but the rest of the dashboard keeps working.
    pub fn initialize(dataset: Result<RegionDataset>, bus: RegionBus) -> Self {
        let regions = match dataset {
            Ok(dataset) => {
                tracing::info!(count = dataset.len(), "Region dataset loaded");
                dataset.into_regions()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Region dataset unavailable, no regions selectable");
                Vec::new()
            }
        };

        Self {
            regions,
            bus,
            heading: RwLock::new(None),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region_names(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn get(&self, region_id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == region_id)
    }

    /// Region under a map coordinate, if any
    pub fn region_at(&self, lon: f64, lat: f64) -> Option<&Region> {
        self.regions
            .iter()
            .find(|r| geometry::contains(&r.geometry, lon, lat))
    }

    /// Click on the shape of `region_id`.
    ///
    /// Publishes exactly one `RegionSelected` per call. Unknown ids are not
    /// shapes on the map, so nothing is published for them.
    pub fn select(&self, region_id: &str) -> Option<RegionSelected> {
        let Some(region) = self.get(region_id) else {
            tracing::debug!(region = %region_id, "Ignoring click on unknown region");
            return None;
        };

        *self.heading.write() = Some(region.id.clone());

        let event = RegionSelected {
            region_id: region.id.clone(),
        };
        let reached = self.bus.publish(event.clone());

        tracing::info!(region = %region.id, subscribers = reached, "Region selected");

        Some(event)
    }

    /// Click at a map coordinate
    pub fn select_at(&self, lon: f64, lat: f64) -> Option<RegionSelected> {
        let id = self.region_at(lon, lat)?.id.clone();
        self.select(&id)
    }

    pub fn heading(&self) -> Option<String> {
        self.heading.read().clone()
    }

    pub fn bus(&self) -> &RegionBus {
        &self.bus
    }
}
