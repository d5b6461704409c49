//! Webhook delivery for review reports

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::model::ReportRequest;
use crate::{Error, Result};

/// Sends report payloads to the configured webhook
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http_client: reqwest::Client,
}

impl WebhookClient {
    /// Client with no request timeout beyond reqwest's defaults
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    /// Client that abandons a request after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Webhook(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http_client })
    }

    /// POST `request` as JSON to `address`
    ///
    /// Any HTTP response counts as delivered; the body is not read.
    pub async fn send(&self, address: &str, request: &ReportRequest) -> Result<StatusCode> {
        let url = url::Url::parse(address)
            .map_err(|e| Error::Webhook(format!("Invalid webhook address {}: {}", address, e)))?;

        debug!(address = %url, user = %request.user, "Posting report");

        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Webhook(format!("Webhook request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(address = %address, status = %status, "Webhook answered with non-success status");
        }
        Ok(status)
    }
}

impl Default for WebhookClient {
    fn default() -> Self {
        Self::new()
    }
}
