// src/core/client.rs

use crate::core::models::{ScanFailure, ScanRequestBody, ScanResponse, ServiceHealth};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

const SCAN_PATH: &str = "api/scan";
const HEALTH_PATH: &str = "api/health";

/// Everything that can go wrong between us and the scanning service.
/// None of it reaches the user: it is logged and collapsed into a [`ScanFailure`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid service endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered with status {0}")]
    Status(StatusCode),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The seam between the lifecycle controller and whatever actually performs a scan.
#[async_trait]
pub trait ScanService: Send + Sync {
    /// Performs exactly one scan request for `target`.
    async fn scan(&self, target: &str) -> Result<ScanResponse, ScanFailure>;
}

/// HTTP client for the remote scanning service.
#[derive(Debug, Clone)]
pub struct ScanClient {
    http: reqwest::Client,
    scan_endpoint: Url,
    health_endpoint: Url,
}

impl ScanClient {
    /// Builds a client for the service rooted at `api_url`.
    ///
    /// No request timeout is configured: a scan takes as long as the service needs.
    pub fn new(api_url: &Url) -> Result<Self, ClientError> {
        let base = with_trailing_slash(api_url);
        let http = reqwest::Client::builder()
            .user_agent(concat!("VanguardGlass/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            scan_endpoint: base.join(SCAN_PATH)?,
            health_endpoint: base.join(HEALTH_PATH)?,
        })
    }

    pub fn scan_endpoint(&self) -> &Url {
        &self.scan_endpoint
    }

    async fn request_scan(&self, target: &str) -> Result<Value, ClientError> {
        debug!(endpoint = %self.scan_endpoint, target, "Sending scan request.");
        let response = self
            .http
            .post(self.scan_endpoint.clone())
            .json(&ScanRequestBody { url: target })
            .send()
            .await?;

        let status = response.status();
        info!(%status, "Received scan response.");
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Probes `GET /api/health`.
    pub async fn health(&self) -> Result<ServiceHealth, ClientError> {
        debug!(endpoint = %self.health_endpoint, "Probing service health.");
        let response = self.http.get(self.health_endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl ScanService for ScanClient {
    async fn scan(&self, target: &str) -> Result<ScanResponse, ScanFailure> {
        match self.request_scan(target).await {
            Ok(body) => Ok(ScanResponse {
                target: target.to_string(),
                received_at: Utc::now(),
                body,
            }),
            Err(e) => {
                error!(target, error = %e, "Scan request failed.");
                Err(ScanFailure::connectivity(target))
            }
        }
    }
}

/// `Url::join` drops the last path segment unless it ends with `/`, which would turn
/// `http://host/prefix` + `api/scan` into `http://host/api/scan`.
fn with_trailing_slash(url: &Url) -> Url {
    let mut base = url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}
