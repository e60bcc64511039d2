//! Request State Machine
//!
//! ```text
//! Idle
//!   ↓ issue
//! Loading
//!   ↓ settle
//! Success | Error
//! ```
//!
//! A new activation starts a new request rather than reusing a settled one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Created, not yet sent
    Idle,
    /// Sent, waiting for the response
    Loading,
    /// Rendered from a data payload
    Success,
    /// Rendered as an error (payload-level or transport)
    Error,
}

impl RequestStatus {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: RequestStatus) -> bool {
        match (self, target) {
            (RequestStatus::Idle, RequestStatus::Loading) => true,
            (RequestStatus::Loading, RequestStatus::Success) => true,
            (RequestStatus::Loading, RequestStatus::Error) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    /// Returns true once a response has been applied
    pub fn is_settled(&self) -> bool {
        matches!(self, RequestStatus::Success | RequestStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Loading => "loading",
            RequestStatus::Success => "success",
            RequestStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(RequestStatus::Idle),
            "loading" => Ok(RequestStatus::Loading),
            "success" => Ok(RequestStatus::Success),
            "error" => Ok(RequestStatus::Error),
            _ => Err(format!("Unknown request status: {}", s)),
        }
    }
}
