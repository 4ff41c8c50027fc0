pub mod dashboard;
pub mod entity;
pub mod geometry;
pub mod network_model;

pub use dashboard::{
    Conflict, Improvements, OptimizationResult, ScenarioRequest, ScenarioResult,
    ScheduleRecommendation, SystemMetrics, TrainStatus,
};
pub use entity::{Direction, Entity};
pub use geometry::{MapPoint, ViewBox};
pub use network_model::{NetworkError, TransitLine, TransitNetwork, TransitPath};
