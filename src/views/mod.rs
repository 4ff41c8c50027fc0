pub mod dashboard_view;
pub mod panels;

pub use dashboard_view::{DashboardState, PanelState};
pub use panels::BadgeLevel;
