use reqwest::Client;
use tracing::debug;

use super::build_http_client;
use crate::error::{Result, TelemetryError};
use crate::models::{Config, NetworkSnapshot, Node};

/// Stellarbeat network API client
pub struct StellarbeatClient {
    client: Client,
    base_url: String,
}

impl StellarbeatClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.stellarbeat_url.clone(),
        })
    }

    /// Get every node known to the network snapshot
    pub async fn get_nodes(&self) -> Result<Vec<Node>> {
        debug!("Making request to: {}", self.base_url);

        let response = self.client.get(&self.base_url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TelemetryError::HttpStatus {
                url: self.base_url.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let snapshot: NetworkSnapshot = serde_json::from_str(&body)
            .map_err(|e| TelemetryError::malformed(&self.base_url, e.to_string()))?;

        debug!("Retrieved {} nodes", snapshot.nodes.len());
        Ok(snapshot.nodes)
    }
}
