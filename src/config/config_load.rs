// src/config/config_load.rs
//
// loading of config.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::config_types::*;

pub const API_URL_ENV: &str = "RAILVIS_API_URL";
pub const REFRESH_SECS_ENV: &str = "RAILVIS_REFRESH_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{name} must be a whole number of seconds, got '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub paths: PathConfig,
    pub window: WindowConfig,
    pub api: ApiConfig,
    pub animation: AnimationConfig,
    pub style: StyleConfig,
    pub scenario: ScenarioConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try the executable's directory, then the working directory
        let config = match Self::exe_dir().map(|dir| dir.join("config.toml")) {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::load_from(Path::new("config.toml"))?,
        };
        config.with_env_overrides(|name| std::env::var(name).ok())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies RAILVIS_API_URL / RAILVIS_REFRESH_SECS on top of the file values.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV) {
            log::info!("{} overrides api.base_url", API_URL_ENV);
            self.api.base_url = url;
        }
        if let Some(value) = lookup(REFRESH_SECS_ENV) {
            self.api.refresh_interval_secs =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    name: REFRESH_SECS_ENV,
                    value: value.clone(),
                })?;
        }
        Ok(self)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.api.refresh_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn resolve_network_path(&self) -> PathBuf {
        Self::resolve_relative(&self.paths.network_file)
    }

    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    // Relative paths are resolved against the executable directory when possible
    fn resolve_relative(path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            return PathBuf::from(path);
        }
        match Self::exe_dir() {
            Some(exe_dir) if exe_dir.join(path).exists() => exe_dir.join(path),
            _ => PathBuf::from(path),
        }
    }
}
