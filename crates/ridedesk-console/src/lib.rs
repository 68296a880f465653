//! ridedesk console
//!
//! Admin console for ride requests: a filtered, paginated view over the
//! request list and the approve/reject/cancel/create actions that feed it.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod dashboard;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod mode;
pub mod render;
pub mod state;
pub mod view;

pub use api_client::{AdminService, HttpAdminService};
pub use dashboard::{Dashboard, DashboardOptions, Notice};
pub use mode::UiMode;
pub use state::AppState;
pub use view::{RequestView, StatusTab};
