// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathConfig {
    pub network_file: String,
}

/************************* Backend API ********************/
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64, // periodic poll of metrics, trains and conflicts
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_timeout() -> u64 {
    10
}

/************************* Animation ********************/
#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    pub ticks_per_second: f32, // train speeds are given in progress per tick
    #[serde(default = "default_autostart")]
    pub autostart: bool,
}

fn default_autostart() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    pub line_weight: f32,
    pub station_radius: f32,
    pub train_radius: f32,
    pub panel_width: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub default_name: String,
    pub types: Vec<String>,
}
