//! Per-activation request record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sismo_api::ApiResponse;

use crate::error::TabError;
use crate::state::RequestStatus;
use crate::Result;
use sismo_render::TabId;

/// Generation number of an activation; later activations get larger tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(pub u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handed out when a fetch is issued, handed back when it settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub token: RequestToken,
    pub region: String,
    pub tab: TabId,
}

/// State of the one request the content area is waiting on
#[derive(Debug, Clone, Serialize)]
pub struct TabRequest {
    pub token: RequestToken,
    pub region: String,
    pub tab: TabId,
    pub status: RequestStatus,
    /// Data payload once settled successfully
    pub payload: Option<ApiResponse>,
    pub error_message: Option<String>,
    pub issued_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl TabRequest {
    pub fn new(token: RequestToken, region: String, tab: TabId) -> Self {
        Self {
            token,
            region,
            tab,
            status: RequestStatus::Idle,
            payload: None,
            error_message: None,
            issued_at: Utc::now(),
            settled_at: None,
        }
    }

    /// Attempt to transition to a new status
    pub fn transition_to(&mut self, new_status: RequestStatus) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(TabError::InvalidTransition {
                from: self.status.to_string(),
                to: new_status.to_string(),
            });
        }

        tracing::debug!(
            token = %self.token,
            tab = %self.tab,
            from = %self.status,
            to = %new_status,
            "Request state transition"
        );

        self.status = new_status;
        if new_status.is_settled() {
            self.settled_at = Some(Utc::now());
        }

        Ok(())
    }

    /// Mark as sent
    pub fn issue(&mut self) -> Result<()> {
        self.issued_at = Utc::now();
        self.transition_to(RequestStatus::Loading)
    }

    pub fn succeed(&mut self, payload: ApiResponse) -> Result<()> {
        self.transition_to(RequestStatus::Success)?;
        self.payload = Some(payload);
        Ok(())
    }

    pub fn fail(&mut self, message: String) -> Result<()> {
        self.transition_to(RequestStatus::Error)?;
        self.error_message = Some(message);
        Ok(())
    }

    pub fn ticket(&self) -> Ticket {
        Ticket {
            token: self.token,
            region: self.region.clone(),
            tab: self.tab,
        }
    }
}
