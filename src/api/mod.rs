use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, PageResponse};

pub mod horizon_client;
pub mod stellarbeat_client;
pub use horizon_client::HorizonClient;
pub use stellarbeat_client::StellarbeatClient;

/// Build the shared HTTP client
///
/// Every request carries the configured `User-Agent`. A timeout is only set
/// when the configuration asks for one.
pub fn build_http_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.http_timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Source of paginated ledger records
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LedgerSource {
    /// Fetch and decode the page at `url`
    async fn fetch_page(&self, url: &str) -> Result<PageResponse>;
}
