//! Dashboard wiring
//!
//! ```text
//! RegionSelector ──RegionSelected──▶ TabController ──▶ DataClient
//!                                          │
//!                                          ▼
//!                                  ContentRenderer ──▶ content area
//! ```

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use sismo_api::{DataClient, HttpDataClient};
use sismo_regions::{RegionBus, RegionDataset, RegionSelected, RegionSelector};
use sismo_render::TabId;
use sismo_tabs::{ContentView, RequestToken, TabController};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

pub struct Dashboard {
    config: Config,
    selector: RegionSelector,
    controller: TabController<dyn DataClient>,
}

impl Dashboard {
    /// Build a dashboard talking to the configured backend.
    ///
    /// A dataset that fails to load is not fatal: the dashboard starts with
    /// no selectable regions.
    pub fn new(config: Config) -> Result<Self> {
        let client = HttpDataClient::new(
            config.api_base()?,
            config.request_timeout(),
            &config.user_agent,
        )?;
        let dataset = RegionDataset::load(&config.dataset_path, &config.region_name_property);

        Ok(Self::with_client(config, Arc::new(client), dataset))
    }

    pub fn with_client(
        config: Config,
        client: Arc<dyn DataClient>,
        dataset: sismo_regions::Result<RegionDataset>,
    ) -> Self {
        let bus = RegionBus::new(config.bus_capacity);
        let selector = RegionSelector::initialize(dataset, bus);
        let controller = TabController::new(client, config.reselect_policy);

        Self {
            config,
            selector,
            controller,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn controller(&self) -> &TabController<dyn DataClient> {
        &self.controller
    }

    pub fn region_names(&self) -> Vec<&str> {
        self.selector.region_names()
    }

    /// Click a region on the map. The event reaches the controller through
    /// the bus, so a [`run`](Self::run) loop must be listening.
    pub fn select_region(&self, region_id: &str) -> Result<RegionSelected> {
        self.selector
            .select(region_id)
            .ok_or_else(|| CoreError::UnknownRegion(region_id.to_string()))
    }

    /// Click a tab button and wait for its fetch to settle.
    ///
    /// Returns `false` when nothing was displayed: no region selected yet,
    /// or a newer activation superseded this one.
    pub async fn activate_tab(&self, tab: TabId) -> bool {
        self.controller.on_tab_activated(tab).await
    }

    pub fn content(&self) -> Option<ContentView> {
        self.controller.content()
    }

    /// Drive the controller from the region bus and a stream of tab clicks.
    pub async fn run(&self, tabs: mpsc::UnboundedReceiver<TabId>) {
        let regions = self.selector.bus().subscribe();
        self.controller.run(regions, tabs).await;
    }

    /// Click `region` on the map, optionally click `tab`, and return the
    /// content area once the last activation has settled.
    pub async fn show(&self, region: &str, tab: Option<TabId>) -> Result<ContentView> {
        let (tab_tx, tab_rx) = mpsc::unbounded_channel();
        let regions = self.selector.bus().subscribe();
        let run = self.controller.run(regions, tab_rx);

        let drive = async {
            let mut content = self.controller.subscribe();
            let before = self.controller.content().map(|v| v.token);

            let event = self.select_region(region)?;

            let mut view =
                wait_settled(&mut content, &event.region_id, before, self.settle_budget()).await?;

            if let Some(tab) = tab.filter(|t| *t != view.tab) {
                tab_tx.send(tab).map_err(|_| CoreError::Stopped)?;
                view = wait_settled(
                    &mut content,
                    &event.region_id,
                    Some(view.token),
                    self.settle_budget(),
                )
                .await?;
            }

            Ok::<_, CoreError>(view)
        };

        // Finishing `drive` drops `run`, cancelling fetches still in flight.
        // Those are all older than the settled view and would be discarded.
        tokio::select! {
            biased;
            out = drive => out,
            _ = run => Err(CoreError::Stopped),
        }
    }

    fn settle_budget(&self) -> Duration {
        self.config.request_timeout() + Duration::from_secs(1)
    }
}

/// Wait for a settled view of `region` newer than `after`
async fn wait_settled(
    content: &mut watch::Receiver<Option<ContentView>>,
    region: &str,
    after: Option<RequestToken>,
    budget: Duration,
) -> Result<ContentView> {
    let wait = content.wait_for(|c| {
        c.as_ref().is_some_and(|v| {
            v.region == region && Some(v.token) > after && !v.model.is_loading()
        })
    });

    let view = tokio::time::timeout(budget, wait)
        .await
        .map_err(|_| CoreError::Timeout)?
        .map_err(|_| CoreError::Stopped)?;

    view.as_ref().cloned().ok_or(CoreError::Stopped)
}
