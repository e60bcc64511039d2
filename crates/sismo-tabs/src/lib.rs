//! Sismo Tabs
//!
//! The coordination layer between region selection and the content area:
//! - Tab buttons, the active tab, and the selected region live here only
//! - Each activation is a fresh request; nothing is cached
//! - Responses are applied in causal order, never arrival order

mod controller;
mod error;
mod request;
mod state;

pub use controller::{ContentView, ReselectPolicy, TabBar, TabButton, TabController};
pub use error::TabError;
pub use request::{RequestToken, TabRequest, Ticket};
pub use sismo_render::TabId;
pub use state::RequestStatus;

pub type Result<T> = std::result::Result<T, TabError>;
