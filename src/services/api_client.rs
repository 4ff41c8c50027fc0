// src/services/api_client.rs
//
// Blocking HTTP client for the traffic-control backend.
// Runs on the refresh worker thread, never on the render thread.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::models::{
    Conflict, OptimizationResult, ScenarioRequest, ScenarioResult, SystemMetrics, TrainStatus,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the dashboard needs from the backend.
pub trait DashboardSource: Send + Sync {
    fn metrics(&self) -> Result<SystemMetrics, ApiError>;
    fn trains(&self) -> Result<Vec<TrainStatus>, ApiError>;
    fn conflicts(&self) -> Result<Vec<Conflict>, ApiError>;
    fn optimize(&self) -> Result<OptimizationResult, ApiError>;
    fn run_scenario(&self, request: &ScenarioRequest) -> Result<ScenarioResult, ApiError>;
}

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                path: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.http.get(self.endpoint(path));
        self.execute(path, request)
    }

    fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&ScenarioRequest>,
    ) -> Result<T, ApiError> {
        let mut request = self
            .http
            .post(self.endpoint(path))
            .header("Content-Type", "application/json");
        request = match body {
            Some(body) => request.json(body),
            None => request.body("{}"),
        };
        self.execute(path, request)
    }

    fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<T, ApiError> {
        let transport = |source| ApiError::Transport {
            path: path.to_string(),
            source,
        };

        let response = request.send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(transport)?;
        decode(path, &body)
    }
}

/// Parses a response body, tagging failures with the endpoint.
pub fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

impl DashboardSource for ApiClient {
    fn metrics(&self) -> Result<SystemMetrics, ApiError> {
        self.get("/api/metrics")
    }

    fn trains(&self) -> Result<Vec<TrainStatus>, ApiError> {
        self.get("/api/trains")
    }

    fn conflicts(&self) -> Result<Vec<Conflict>, ApiError> {
        self.get("/api/conflicts")
    }

    fn optimize(&self) -> Result<OptimizationResult, ApiError> {
        self.post("/api/optimize", None)
    }

    fn run_scenario(&self, request: &ScenarioRequest) -> Result<ScenarioResult, ApiError> {
        self.post("/api/scenario", Some(request))
    }
}
