// src/views/dashboard_view.rs
//
// Per-panel state of the dashboard, fed by RefreshService updates.
// A failed fetch replaces only its own panel with an inline error.

use crate::models::{Conflict, OptimizationResult, ScenarioResult, SystemMetrics, TrainStatus};
use crate::services::DashboardUpdate;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState<T> {
    #[default]
    Empty,
    Ready(T),
    Failed(String),
}

impl<T> PanelState<T> {
    fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => PanelState::Ready(value),
            Err(message) => PanelState::Failed(message),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PanelState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PanelState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub metrics: PanelState<SystemMetrics>,
    pub trains: PanelState<Vec<TrainStatus>>,
    pub conflicts: PanelState<Vec<Conflict>>,
    pub recommendations: PanelState<OptimizationResult>,
    pub scenario: PanelState<ScenarioResult>,
    optimization_pending: bool,
    scenario_pending: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, update: DashboardUpdate) {
        match update {
            DashboardUpdate::Metrics(result) => self.metrics = PanelState::from_result(result),
            DashboardUpdate::Trains(result) => self.trains = PanelState::from_result(result),
            DashboardUpdate::Conflicts(result) => {
                self.conflicts = PanelState::from_result(result)
            }
            DashboardUpdate::Optimization(result) => {
                self.optimization_pending = false;
                self.recommendations = PanelState::from_result(result);
            }
            DashboardUpdate::Scenario(result) => {
                self.scenario_pending = false;
                self.scenario = PanelState::from_result(result);
            }
        }
    }

    pub fn apply_all(&mut self, updates: impl IntoIterator<Item = DashboardUpdate>) {
        for update in updates {
            self.apply(update);
        }
    }

    /// Marks an optimization as in flight. Returns false if one already is.
    pub fn begin_optimization(&mut self) -> bool {
        if self.optimization_pending {
            return false;
        }
        self.optimization_pending = true;
        true
    }

    pub fn begin_scenario(&mut self) -> bool {
        if self.scenario_pending {
            return false;
        }
        self.scenario_pending = true;
        true
    }

    pub fn optimization_pending(&self) -> bool {
        self.optimization_pending
    }

    pub fn scenario_pending(&self) -> bool {
        self.scenario_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updates_fill_their_own_panel() {
        let mut state = DashboardState::new();
        assert_eq!(state.metrics, PanelState::Empty);

        state.apply_all(vec![
            DashboardUpdate::Metrics(Ok(SystemMetrics {
                total_trains: 10,
                ..Default::default()
            })),
            DashboardUpdate::Conflicts(Err("Error detecting conflicts".to_string())),
        ]);

        assert_eq!(state.metrics.ready().map(|m| m.total_trains), Some(10));
        assert_eq!(state.conflicts.error(), Some("Error detecting conflicts"));
        assert_eq!(state.trains, PanelState::Empty);
    }

    #[test]
    fn test_failure_then_recovery() {
        let mut state = DashboardState::new();
        state.apply(DashboardUpdate::Trains(Err("Error loading train data".to_string())));
        assert!(state.trains.error().is_some());

        state.apply(DashboardUpdate::Trains(Ok(Vec::new())));
        assert_eq!(state.trains, PanelState::Ready(Vec::new()));
    }

    #[test]
    fn test_optimization_pending_guard() {
        let mut state = DashboardState::new();
        assert!(state.begin_optimization());
        assert!(!state.begin_optimization());
        assert!(state.optimization_pending());

        state.apply(DashboardUpdate::Optimization(Err(
            "Error running optimization".to_string(),
        )));
        assert!(!state.optimization_pending());
        assert!(state.begin_optimization());
    }

    #[test]
    fn test_scenario_pending_guard() {
        let mut state = DashboardState::new();
        assert!(state.begin_scenario());
        assert!(!state.begin_scenario());
        state.apply(DashboardUpdate::Scenario(Ok(ScenarioResult::default())));
        assert!(!state.scenario_pending());
        assert!(state.scenario.ready().is_some());
    }
}
