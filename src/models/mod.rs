use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Newest-first ledger page on the public Horizon instance
pub const DEFAULT_HORIZON_URL: &str = "https://horizon.stellar.org/ledgers?limit=200&order=desc";

/// Stellarbeat network snapshot endpoint
pub const DEFAULT_STELLARBEAT_URL: &str = "https://api.stellarbeat.io/v1";

pub const DEFAULT_STOP_DATE_PREFIX: &str = "2021-05-15T12";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

// ============================================================================
// Horizon ledger pages
// ============================================================================

/// One closed ledger as returned by Horizon
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LedgerRecord {
    pub closed_at: String,
    pub operation_count: u64,
    pub successful_transaction_count: u64,
    /// Nullable upstream on older ledgers; the key itself is still required
    #[serde(deserialize_with = "Option::deserialize")]
    pub failed_transaction_count: Option<u64>,
}

/// Flattened ledger activity written to the CSV sink
///
/// Column order is timestamp, ops, txs, ftxs. An unknown `ftxs` is an
/// empty field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivityRow {
    pub timestamp: String,
    pub ops: u64,
    pub txs: u64,
    pub ftxs: Option<u64>,
}

impl From<LedgerRecord> for ActivityRow {
    fn from(record: LedgerRecord) -> Self {
        Self {
            timestamp: record.closed_at,
            ops: record.operation_count,
            txs: record.successful_transaction_count,
            ftxs: record.failed_transaction_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    pub next: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddedRecords {
    pub records: Option<Vec<LedgerRecord>>,
}

/// A single Horizon page, or a Horizon problem document
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    /// Only present on problem documents (e.g. 404, 429, 503)
    pub status: Option<serde_json::Value>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<EmbeddedRecords>,
    #[serde(rename = "_links", default)]
    pub links: PageLinks,
}

/// Why a page was read as the end of the data
#[derive(Debug, Clone, PartialEq)]
pub enum EndCause {
    StatusField(String),
    MissingEmbedded,
    EmptyPage,
}

/// Validated reading of a page
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Records {
        rows: Vec<ActivityRow>,
        next: Option<String>,
    },
    EndOfStream(EndCause),
}

impl PageResponse {
    pub fn into_outcome(self) -> PageOutcome {
        if let Some(status) = self.status {
            let status = match status {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            return PageOutcome::EndOfStream(EndCause::StatusField(status));
        }

        let records = match self.embedded.and_then(|embedded| embedded.records) {
            Some(records) => records,
            None => return PageOutcome::EndOfStream(EndCause::MissingEmbedded),
        };

        if records.is_empty() {
            return PageOutcome::EndOfStream(EndCause::EmptyPage);
        }

        PageOutcome::Records {
            rows: records.into_iter().map(ActivityRow::from).collect(),
            next: self.links.next.map(|link| link.href),
        }
    }
}

// ============================================================================
// Stellarbeat nodes
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub is_validator: bool,
    #[serde(default)]
    pub is_full_validator: bool,
}

#[derive(Debug, Deserialize)]
pub struct NetworkSnapshot {
    pub nodes: Vec<Node>,
}

/// Active node counts by role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeTally {
    pub full: usize,
    pub basic: usize,
    pub watcher: usize,
}

impl NodeTally {
    pub fn total(&self) -> usize {
        self.full + self.basic + self.watcher
    }
}

// ============================================================================
// Local telemetry samples
// ============================================================================

/// One `top -b` snapshot reduced to the report columns
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TopSample {
    pub timestamp: String,
    pub cpu_us: String,
    pub cpu_sy: String,
    pub cpu_id: String,
    pub mem_used: String,
    pub mem_buff: String,
    pub stellar_cpu: Option<String>,
    pub stellar_mem: Option<String>,
    pub pgsql_cpu: Option<String>,
    pub pgsql_mem: Option<String>,
}

/// Bytes received/transmitted in one vnstat bucket
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrafficSample {
    pub timestamp: String,
    pub rx: u64,
    pub tx: u64,
}

/// Power draw in watts for one power-monitor sample
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PowerReading {
    pub timestamp: String,
    #[serde(rename = "CORE")]
    pub core: Option<f64>,
    #[serde(rename = "CPU")]
    pub cpu: Option<f64>,
    #[serde(rename = "DRAM")]
    pub dram: Option<f64>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the telemetry tools
#[derive(Debug, Clone)]
pub struct Config {
    pub horizon_url: String,
    pub stellarbeat_url: String,
    pub user_agent: String,
    pub stop_date_prefix: String,
    /// `None` leaves requests without a timeout
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            horizon_url: DEFAULT_HORIZON_URL.to_string(),
            stellarbeat_url: DEFAULT_STELLARBEAT_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            stop_date_prefix: DEFAULT_STOP_DATE_PREFIX.to_string(),
            http_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let defaults = Config::default();
        let http_timeout = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a whole number of seconds, got {:?}", raw))?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Config {
            horizon_url: std::env::var("HORIZON_URL").unwrap_or(defaults.horizon_url),
            stellarbeat_url: std::env::var("STELLARBEAT_URL").unwrap_or(defaults.stellarbeat_url),
            user_agent: std::env::var("USER_AGENT").unwrap_or(defaults.user_agent),
            stop_date_prefix: std::env::var("STOP_DATE_PREFIX").unwrap_or(defaults.stop_date_prefix),
            http_timeout,
        })
    }
}
