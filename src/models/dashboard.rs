// src/models/dashboard.rs
// Payloads exchanged with the traffic-control backend.
// Everything deserializes leniently: absent or null numbers become 0, text becomes "".

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SystemMetrics {
    #[serde(deserialize_with = "null_default")]
    pub total_trains: u32,
    #[serde(deserialize_with = "null_default")]
    pub active_conflicts: u32,
    #[serde(deserialize_with = "null_default")]
    pub average_delay: f64,
    #[serde(deserialize_with = "null_default")]
    pub system_efficiency: f64,
    #[serde(deserialize_with = "null_default")]
    pub throughput_today: u32,
    #[serde(deserialize_with = "null_default")]
    pub optimization_success_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainStatus {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "null_default")]
    pub name: String,
    #[serde(deserialize_with = "null_default")]
    pub current_position: String,
    #[serde(deserialize_with = "null_default")]
    pub destination: String,
    #[serde(deserialize_with = "null_default")]
    pub status: String,
    #[serde(deserialize_with = "null_default")]
    pub delay_minutes: u32,
    #[serde(deserialize_with = "null_default")]
    pub speed: f64,
    pub priority: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Conflict {
    #[serde(rename = "type", deserialize_with = "null_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    #[serde(deserialize_with = "null_default")]
    pub severity: String,
    pub estimated_time: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Improvements {
    #[serde(deserialize_with = "lenient_string")]
    pub delay_reduction: String,
    #[serde(deserialize_with = "lenient_string")]
    pub throughput_increase: String,
    #[serde(deserialize_with = "null_default")]
    pub conflicts_resolved: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScheduleRecommendation {
    #[serde(deserialize_with = "null_default")]
    pub train_name: String,
    #[serde(deserialize_with = "null_default")]
    pub recommendation: String,
    #[serde(deserialize_with = "lenient_string")]
    pub priority: String,
    #[serde(deserialize_with = "lenient_string")]
    pub platform: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OptimizationResult {
    #[serde(deserialize_with = "null_default")]
    pub success: bool,
    pub improvements: Option<Improvements>,
    #[serde(deserialize_with = "null_default")]
    pub optimized_schedule: Vec<ScheduleRecommendation>,
    pub error: Option<String>,
    /// Set by the backend when there was nothing to optimize.
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioResult {
    #[serde(deserialize_with = "null_default")]
    pub scenario_name: String,
    #[serde(deserialize_with = "null_default")]
    pub predicted_delay: f64,
    #[serde(deserialize_with = "null_default")]
    pub throughput_change: f64,
    #[serde(deserialize_with = "null_default")]
    pub safety_score: f64,
    #[serde(deserialize_with = "null_default")]
    pub recommendations: Vec<String>,
}

/// Accepts a string, a number, a bool or null and keeps it as display text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// An explicit null reads the same as a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_missing_fields_default_to_zero() {
        let metrics: SystemMetrics = serde_json::from_str(r#"{ "total_trains": 10 }"#).unwrap();
        assert_eq!(metrics.total_trains, 10);
        assert_eq!(metrics.active_conflicts, 0);
        assert_eq!(metrics.average_delay, 0.0);
        assert_eq!(metrics.optimization_success_rate, 0.0);
    }

    #[test]
    fn test_metrics_ignore_unknown_fields() {
        let json = r#"{ "total_trains": 3, "safety_incidents": 0, "average_delay": 4.5 }"#;
        let metrics: SystemMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(metrics.average_delay, 4.5);
    }

    #[test]
    fn test_train_list() {
        let json = r#"[
            { "id": "TRN001", "name": "Rajdhani Express", "current_position": "New Delhi",
              "destination": "Mumbai Central", "status": "Delayed", "delay_minutes": 12,
              "speed": 96, "priority": 3 },
            { "name": "Freight Special" }
        ]"#;
        let trains: Vec<TrainStatus> = serde_json::from_str(json).unwrap();
        assert_eq!(trains.len(), 2);
        assert_eq!(trains[0].speed, 96.0);
        assert_eq!(trains[0].priority, Some(3));
        assert_eq!(trains[1].delay_minutes, 0);
        assert_eq!(trains[1].status, "");
    }

    #[test]
    fn test_null_fields_do_not_sink_the_list() {
        let json = r#"[
            { "name": "Duronto Express", "status": null, "delay_minutes": null,
              "speed": null, "current_position": "Nagpur", "priority": null },
            { "name": "Gatimaan Express", "status": "On Time", "delay_minutes": 0 }
        ]"#;
        let trains: Vec<TrainStatus> = serde_json::from_str(json).unwrap();
        assert_eq!(trains.len(), 2);
        assert_eq!(trains[0].status, "");
        assert_eq!(trains[0].delay_minutes, 0);
        assert_eq!(trains[0].speed, 0.0);
        assert_eq!(trains[0].priority, None);
        assert_eq!(trains[1].status, "On Time");

        let metrics: SystemMetrics =
            serde_json::from_str(r#"{ "total_trains": 4, "average_delay": null }"#).unwrap();
        assert_eq!(metrics.average_delay, 0.0);

        let result: ScenarioResult =
            serde_json::from_str(r#"{ "scenario_name": null, "recommendations": null }"#).unwrap();
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_conflict_type_field() {
        let json = r#"{ "type": "track_conflict", "description": "x", "severity": "high" }"#;
        let conflict: Conflict = serde_json::from_str(json).unwrap();
        assert_eq!(conflict.kind, "track_conflict");
        assert_eq!(conflict.estimated_time, None);
    }

    #[test]
    fn test_optimization_accepts_numbers_and_strings() {
        let json = r#"{
            "success": true,
            "improvements": { "delay_reduction": "31%", "throughput_increase": 18, "conflicts_resolved": 2 },
            "optimized_schedule": [
                { "train_name": "Vande Bharat", "recommendation": "Hold 3 min", "priority": 3, "platform": "4" }
            ]
        }"#;
        let result: OptimizationResult = serde_json::from_str(json).unwrap();
        let improvements = result.improvements.unwrap();
        assert_eq!(improvements.delay_reduction, "31%");
        assert_eq!(improvements.throughput_increase, "18");
        assert_eq!(result.optimized_schedule[0].priority, "3");
        assert_eq!(result.optimized_schedule[0].platform, "4");
    }

    #[test]
    fn test_optimization_without_conflicts() {
        let json = r#"{ "success": true, "message": "No conflicts detected. System running optimally.", "conflicts_resolved": 0 }"#;
        let result: OptimizationResult = serde_json::from_str(json).unwrap();
        assert!(result.success);
        assert!(result.improvements.is_none());
        assert!(result.optimized_schedule.is_empty());
        assert!(result.message.is_some());
    }

    #[test]
    fn test_scenario_request_body() {
        let request = ScenarioRequest {
            name: "Monsoon".to_string(),
            kind: "weather".to_string(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Monsoon", "type": "weather" }));
    }
}
