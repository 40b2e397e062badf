use reqwest::Client;
use tracing::{debug, warn};

use super::{build_http_client, LedgerSource};
use crate::error::{Result, TelemetryError};
use crate::models::{Config, PageResponse};

/// Horizon ledger API client
pub struct HorizonClient {
    client: Client,
}

impl HorizonClient {
    /// Create a new Horizon client
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait::async_trait]
impl LedgerSource for HorizonClient {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse> {
        debug!("Making request to: {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/hal+json, application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Response {} received: {} bytes", status, body.len());

        if !status.is_success() {
            // Horizon answers exhausted cursors and rate limits with a problem
            // document; those carry `status` and end the stream upstream.
            if let Ok(page) = serde_json::from_str::<PageResponse>(&body) {
                if page.status.is_some() {
                    warn!("Horizon returned problem document ({}) for {}", status, url);
                    return Ok(page);
                }
            }
            return Err(TelemetryError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<PageResponse>(&body)
            .map_err(|e| TelemetryError::malformed(url, e.to_string()))
    }
}
