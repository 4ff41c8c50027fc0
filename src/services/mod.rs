pub mod api_client;
pub mod refresh_service;

pub use api_client::{ApiClient, ApiError, DashboardSource};
pub use refresh_service::{DashboardUpdate, RefreshScope, RefreshService};
