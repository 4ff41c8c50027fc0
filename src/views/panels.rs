// src/views/panels.rs
//
// Presentation adapters: API payloads in, display-ready cards out.
// Nothing in here knows about nannou; the panel renderer does the drawing.

use crate::models::{Conflict, OptimizationResult, ScenarioResult, SystemMetrics, TrainStatus};
use crate::utilities::formatters::{
    conflict_title, format_delay, format_percentage, format_signed_percent, format_time_until,
    parse_train_number, priority_text, trim_number,
};

/// Speed that fills the speed bar completely, in km/h.
pub const FULL_SPEED_BAR_KMH: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeLevel {
    Success,
    Danger,
    Warning,
    Info,
    Secondary,
}

pub fn status_badge(status: &str) -> BadgeLevel {
    match status.to_lowercase().as_str() {
        "on time" => BadgeLevel::Success,
        "delayed" => BadgeLevel::Danger,
        "approaching" => BadgeLevel::Warning,
        "at platform" => BadgeLevel::Info,
        _ => BadgeLevel::Secondary,
    }
}

pub fn severity_badge(severity: &str) -> BadgeLevel {
    match severity.to_lowercase().as_str() {
        "high" => BadgeLevel::Danger,
        "medium" => BadgeLevel::Warning,
        "low" => BadgeLevel::Info,
        _ => BadgeLevel::Secondary,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

pub fn metric_tiles(metrics: &SystemMetrics) -> Vec<MetricTile> {
    vec![
        MetricTile {
            label: "Total Trains",
            value: metrics.total_trains.to_string(),
        },
        MetricTile {
            label: "Active Conflicts",
            value: metrics.active_conflicts.to_string(),
        },
        MetricTile {
            label: "Average Delay",
            value: format!("{:.1}min", metrics.average_delay),
        },
        MetricTile {
            label: "System Efficiency",
            value: format_percentage(metrics.system_efficiency, 1),
        },
        MetricTile {
            label: "Throughput Today",
            value: metrics.throughput_today.to_string(),
        },
        MetricTile {
            label: "AI Success Rate",
            value: format_percentage(metrics.optimization_success_rate, 1),
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainCard {
    pub title: String,
    pub route: String,
    pub status: String,
    pub badge: BadgeLevel,
    pub delay: String,
    /// Fill of the speed bar, 0..=1.
    pub speed_fraction: f32,
    pub speed: String,
    pub priority: Option<&'static str>,
}

pub fn train_card(train: &TrainStatus) -> TrainCard {
    // Backend id first, else a train number embedded in the name
    let number = if train.id.is_empty() {
        parse_train_number(&train.name)
    } else {
        Some(train.id.clone())
    };
    let title = match number {
        Some(number) if !train.name.contains(&number) => format!("{} ({})", train.name, number),
        _ => train.name.clone(),
    };

    TrainCard {
        title,
        route: format!("{} → {}", train.current_position, train.destination),
        status: train.status.clone(),
        badge: status_badge(&train.status),
        delay: format_delay(train.delay_minutes),
        speed_fraction: (train.speed / FULL_SPEED_BAR_KMH).clamp(0.0, 1.0) as f32,
        speed: format!("{} km/h", trim_number(train.speed)),
        priority: train.priority.map(priority_text),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConflictCard {
    pub title: String,
    pub description: String,
    pub severity: String,
    pub badge: BadgeLevel,
    pub eta: Option<String>,
}

pub fn conflict_card(conflict: &Conflict) -> ConflictCard {
    ConflictCard {
        title: conflict_title(&conflict.kind),
        description: conflict.description.clone(),
        severity: conflict.severity.clone(),
        badge: severity_badge(&conflict.severity),
        eta: conflict
            .estimated_time
            .filter(|t| *t != 0.0)
            .map(|t| format_time_until(t.round() as i64)),
    }
}

/// A styled line of panel text.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelLine {
    pub text: String,
    pub level: BadgeLevel,
}

impl PanelLine {
    fn new(text: impl Into<String>, level: BadgeLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

pub fn optimization_lines(result: &OptimizationResult) -> Vec<PanelLine> {
    if !result.success {
        let error = result
            .error
            .clone()
            .unwrap_or_else(|| "Optimization failed".to_string());
        return vec![PanelLine::new(error, BadgeLevel::Danger)];
    }

    let mut lines = Vec::new();
    match &result.improvements {
        Some(improvements) => {
            lines.push(PanelLine::new("Optimization Complete!", BadgeLevel::Success));
            lines.push(PanelLine::new(
                format!("Delay Reduction: {}", improvements.delay_reduction),
                BadgeLevel::Success,
            ));
            lines.push(PanelLine::new(
                format!("Throughput Increase: {}", improvements.throughput_increase),
                BadgeLevel::Success,
            ));
            lines.push(PanelLine::new(
                format!("Conflicts Resolved: {}", improvements.conflicts_resolved),
                BadgeLevel::Success,
            ));
        }
        None => {
            let message = result
                .message
                .clone()
                .unwrap_or_else(|| "Optimization Complete!".to_string());
            lines.push(PanelLine::new(message, BadgeLevel::Success));
        }
    }

    if !result.optimized_schedule.is_empty() {
        lines.push(PanelLine::new("Recommendations:", BadgeLevel::Secondary));
        for schedule in &result.optimized_schedule {
            lines.push(PanelLine::new(schedule.train_name.clone(), BadgeLevel::Info));
            lines.push(PanelLine::new(
                format!("  {}", schedule.recommendation),
                BadgeLevel::Secondary,
            ));
            lines.push(PanelLine::new(
                format!(
                    "  Priority: {}  Platform: {}",
                    schedule.priority, schedule.platform
                ),
                BadgeLevel::Info,
            ));
        }
    }
    lines
}

pub fn scenario_lines(result: &ScenarioResult) -> Vec<PanelLine> {
    let mut lines = vec![
        PanelLine::new(
            format!("Scenario Results: {}", result.scenario_name),
            BadgeLevel::Info,
        ),
        PanelLine::new(
            format!("Predicted Delay: {} min", trim_number(result.predicted_delay)),
            BadgeLevel::Secondary,
        ),
        PanelLine::new(
            format!(
                "Throughput Change: {}",
                format_signed_percent(result.throughput_change)
            ),
            BadgeLevel::Secondary,
        ),
        PanelLine::new(
            format!("Safety Score: {}%", trim_number(result.safety_score)),
            BadgeLevel::Secondary,
        ),
    ];
    if !result.recommendations.is_empty() {
        lines.push(PanelLine::new("Recommendations:", BadgeLevel::Info));
        lines.extend(
            result
                .recommendations
                .iter()
                .map(|rec| PanelLine::new(format!("• {}", rec), BadgeLevel::Secondary)),
        );
    }
    lines
}
