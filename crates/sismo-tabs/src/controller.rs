//! Tab Controller
//!
//! Single writer for the selected region, the tab bar and the content area.
//!
//! Every activation bumps a generation counter and carries the new value as
//! its [`RequestToken`]. When a fetch settles, its token is compared with the
//! current generation; anything older is dropped on arrival. In-flight
//! requests are never aborted, only ignored.

use futures_util::future::{BoxFuture, FutureExt};
use futures_util::stream::{FuturesUnordered, StreamExt};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, watch};

use sismo_api::{ApiResponse, DataClient, FetchError};
use sismo_regions::RegionSelected;
use sismo_render::{DisplayModel, TabId, FAILURE_MESSAGE};

use crate::request::{RequestToken, TabRequest, Ticket};

/// What to activate when a region is selected while a tab is already active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReselectPolicy {
    /// Refetch the active tab for the new region
    #[default]
    KeepActive,
    /// Always go back to the forecast tab
    ResetToDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabButton {
    pub tab: TabId,
    pub label: &'static str,
    pub active: bool,
}

/// Tab bar as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabBar {
    pub region: Option<String>,
    /// Hidden until the first region selection
    pub visible: bool,
    pub active: Option<TabId>,
    pub buttons: Vec<TabButton>,
}

/// Content area: the model plus the activation it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentView {
    pub region: String,
    pub tab: TabId,
    pub token: RequestToken,
    pub model: DisplayModel,
}

#[derive(Debug, Default)]
struct ControllerState {
    region: Option<String>,
    active: Option<TabId>,
    visible: bool,
    generation: u64,
    request: Option<TabRequest>,
}

pub struct TabController<C: DataClient + ?Sized> {
    client: Arc<C>,
    state: Mutex<ControllerState>,
    content: watch::Sender<Option<ContentView>>,
    policy: ReselectPolicy,
}

impl<C: DataClient + ?Sized> TabController<C> {
    pub fn new(client: Arc<C>, policy: ReselectPolicy) -> Self {
        let (content, _rx) = watch::channel(None);

        Self {
            client,
            state: Mutex::new(ControllerState::default()),
            content,
            policy,
        }
    }

    pub fn policy(&self) -> ReselectPolicy {
        self.policy
    }

    /// Record a region selection and return the tab that should be activated.
    ///
    /// Does not fetch; pair with [`Self::on_tab_activated`] or use
    /// [`Self::on_region_selected`]. Any fetch still in flight belongs to the
    /// previous selection and will be discarded when it settles.
    pub fn select_region(&self, region_id: &str) -> TabId {
        let mut state = self.state.lock();
        state.region = Some(region_id.to_string());
        state.visible = true;
        state.generation += 1;

        let tab = match (self.policy, state.active) {
            (ReselectPolicy::KeepActive, Some(active)) => active,
            _ => TabId::DEFAULT,
        };

        tracing::info!(region = %region_id, tab = %tab, "Region selected");

        tab
    }

    /// Handle `RegionSelected`: take the same path a click on the tab would.
    pub async fn on_region_selected(&self, event: &RegionSelected) -> bool {
        let tab = self.select_region(&event.region_id);
        self.on_tab_activated(tab).await
    }

    /// Handle a tab button activation end to end.
    ///
    /// Returns true if the response was applied to the content area, false
    /// if the activation was ignored (no region yet) or superseded.
    pub async fn on_tab_activated(&self, tab: TabId) -> bool {
        match self.begin(tab) {
            Some(ticket) => self.complete(ticket).await,
            None => false,
        }
    }

    /// Synchronous half of an activation: mark the button, show the loading
    /// placeholder and hand out a ticket for the fetch.
    ///
    /// Returns `None` without touching any state when no region is selected.
    pub fn begin(&self, tab: TabId) -> Option<Ticket> {
        let mut state = self.state.lock();

        let Some(region) = state.region.clone() else {
            tracing::debug!(tab = %tab, "No region selected, ignoring tab activation");
            return None;
        };

        let token = RequestToken(state.generation + 1);
        let mut request = TabRequest::new(token, region.clone(), tab);
        if let Err(e) = request.issue() {
            tracing::warn!(error = %e, tab = %tab, "Could not issue request");
            return None;
        }

        state.generation = token.0;
        state.active = Some(tab);
        let ticket = request.ticket();
        state.request = Some(request);

        self.content.send_replace(Some(ContentView {
            region: region.clone(),
            tab,
            token,
            model: sismo_render::loading(tab),
        }));

        tracing::info!(
            region = %region,
            tab = %tab,
            token = %token,
            kind = %tab.resource_kind(),
            "Issuing fetch"
        );

        Some(ticket)
    }

    /// Asynchronous half: fetch, then settle.
    pub async fn complete(&self, ticket: Ticket) -> bool {
        let result = self
            .client
            .fetch(ticket.tab.resource_kind(), &ticket.region)
            .await;
        self.settle(ticket, result)
    }

    /// Apply a fetch result if its ticket is still the latest activation.
    pub fn settle(&self, ticket: Ticket, result: Result<ApiResponse, FetchError>) -> bool {
        let mut state = self.state.lock();

        if state.generation != ticket.token.0 {
            tracing::debug!(
                region = %ticket.region,
                tab = %ticket.tab,
                token = %ticket.token,
                current = state.generation,
                "Discarding stale response"
            );
            return false;
        }

        let Some(request) = state.request.as_mut() else {
            return false;
        };

        let model = match result {
            Ok(response) => {
                let model = sismo_render::render(ticket.tab, &response);
                let failure_message = match &response {
                    ApiResponse::Failure(f) => Some(f.error.clone()),
                    _ => None,
                };

                let outcome = match failure_message {
                    Some(message) => {
                        tracing::info!(
                            region = %ticket.region,
                            tab = %ticket.tab,
                            message = %message,
                            "Server reported an error"
                        );
                        request.fail(message)
                    }
                    None => request.succeed(response),
                };
                if let Err(e) = outcome {
                    tracing::warn!(error = %e, token = %ticket.token, "Unexpected request state");
                }
                model
            }
            Err(e) => {
                tracing::error!(
                    region = %ticket.region,
                    tab = %ticket.tab,
                    token = %ticket.token,
                    error = %e,
                    cause = ?std::error::Error::source(&e),
                    "Failed to load tab data"
                );
                if let Err(e) = request.fail(FAILURE_MESSAGE.to_string()) {
                    tracing::warn!(error = %e, token = %ticket.token, "Unexpected request state");
                }
                sismo_render::failure(ticket.tab)
            }
        };

        tracing::debug!(token = %ticket.token, status = %request.status, "Response applied");

        self.content.send_replace(Some(ContentView {
            region: ticket.region,
            tab: ticket.tab,
            token: ticket.token,
            model,
        }));

        true
    }

    /// Cooperative event loop.
    ///
    /// Region selections and tab clicks are handled in arrival order; their
    /// fetches overlap. Returns once both inputs are closed and every
    /// in-flight fetch has settled.
    pub async fn run(
        &self,
        mut regions: broadcast::Receiver<RegionSelected>,
        mut tabs: mpsc::UnboundedReceiver<TabId>,
    ) {
        let mut in_flight: FuturesUnordered<BoxFuture<'_, bool>> = FuturesUnordered::new();
        let mut regions_open = true;
        let mut tabs_open = true;

        loop {
            if !regions_open && !tabs_open && in_flight.is_empty() {
                break;
            }

            tokio::select! {
                msg = regions.recv(), if regions_open => match msg {
                    Ok(event) => {
                        let tab = self.select_region(&event.region_id);
                        if let Some(ticket) = self.begin(tab) {
                            in_flight.push(self.complete(ticket).boxed());
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Region selections dropped");
                    }
                    Err(RecvError::Closed) => regions_open = false,
                },
                tab = tabs.recv(), if tabs_open => match tab {
                    Some(tab) => {
                        if let Some(ticket) = self.begin(tab) {
                            in_flight.push(self.complete(ticket).boxed());
                        }
                    }
                    None => tabs_open = false,
                },
                Some(_) = in_flight.next(), if !in_flight.is_empty() => {}
                else => break,
            }
        }

        tracing::debug!("Tab controller stopped");
    }

    pub fn tab_bar(&self) -> TabBar {
        let state = self.state.lock();
        TabBar {
            region: state.region.clone(),
            visible: state.visible,
            active: state.active,
            buttons: TabId::ALL
                .iter()
                .map(|&tab| TabButton {
                    tab,
                    label: tab.label(),
                    active: state.active == Some(tab),
                })
                .collect(),
        }
    }

    pub fn current_region(&self) -> Option<String> {
        self.state.lock().region.clone()
    }

    pub fn active_tab(&self) -> Option<TabId> {
        self.state.lock().active
    }

    /// The latest request, whatever its status
    pub fn request(&self) -> Option<TabRequest> {
        self.state.lock().request.clone()
    }

    pub fn content(&self) -> Option<ContentView> {
        self.content.borrow().clone()
    }

    /// Follow the content area, e.g. to drive a presenter
    pub fn subscribe(&self) -> watch::Receiver<Option<ContentView>> {
        self.content.subscribe()
    }
}
