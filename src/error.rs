use thiserror::Error;

/// Errors raised by the telemetry tools
///
/// Nothing here is retried. A Horizon page that signals the end of data is
/// not an error; see `models::PageOutcome`.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request to {url} failed with status {status}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    #[error("filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid input in {source_name}: {reason}")]
    Parse { source_name: String, reason: String },
}

impl TelemetryError {
    pub fn malformed(url: &str, reason: impl Into<String>) -> Self {
        TelemetryError::MalformedResponse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub fn parse(source_name: &str, reason: impl Into<String>) -> Self {
        TelemetryError::Parse {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures of the HTTP exchange itself
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            TelemetryError::Transport(_) | TelemetryError::HttpStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
