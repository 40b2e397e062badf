//! Ledger activity fetching
//!
//! Pages backward through Horizon from a starting page, flattening every
//! ledger into an [`ActivityRow`] and appending it to a CSV sink. A run ends
//! when a page's first ledger closed inside the stop-date prefix, when
//! Horizon signals the end of data, or on the first fatal error.
//!
//! Runs are not idempotent: the sink is opened in append mode and rows are
//! never deduplicated, so repeating a run writes every row again.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::api::LedgerSource;
use crate::error::{Result, TelemetryError};
use crate::models::{ActivityRow, Config, EndCause, PageOutcome};

/// Where to start and when to stop
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub start_url: String,
    /// Compared against the raw `closed_at` text, e.g. `2021-05-15T12`
    pub stop_date_prefix: String,
}

impl FetchConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            start_url: config.horizon_url.clone(),
            stop_date_prefix: config.stop_date_prefix.clone(),
        }
    }
}

/// Terminal state of a run
#[derive(Debug, Clone, PartialEq)]
pub enum StopReason {
    StopDateReached,
    EndOfStream(EndCause),
    /// A page had records but no `next` link
    NoNextLink,
}

/// Result of a fetch run
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSummary {
    /// `next` link of the first page, empty if the first page had none
    pub start_link: String,
    /// Last URL that was fetched
    pub stopped_on: String,
    pub pages_fetched: usize,
    pub rows_written: usize,
    pub reason: StopReason,
}

impl FetchSummary {
    /// The two end-of-run lines printed by the fetch binary
    pub fn report_lines(&self) -> String {
        format!("Started on {}\nStopped on {}", self.start_link, self.stopped_on)
    }
}

enum FetchState {
    Fetching { url: String },
    Done(StopReason),
}

/// Append-only CSV destination for activity rows
pub struct ActivitySink<W: Write> {
    writer: csv::Writer<W>,
    rows_written: usize,
}

impl ActivitySink<File> {
    /// Open (or create) `path` in append mode
    pub fn open_append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> ActivitySink<W> {
    pub fn from_writer(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            .from_writer(inner);
        Self {
            writer,
            rows_written: 0,
        }
    }

    /// Append a page of rows and flush them before returning
    pub fn write_page(&mut self, rows: &[ActivityRow]) -> Result<()> {
        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        self.rows_written += rows.len();
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| TelemetryError::Filesystem(e.into_error()))
    }
}

/// Page through `source` until a stop condition is met
pub async fn run<S, W>(
    source: &S,
    config: &FetchConfig,
    sink: &mut ActivitySink<W>,
) -> Result<FetchSummary>
where
    S: LedgerSource + ?Sized,
    W: Write,
{
    let rows_before = sink.rows_written();
    let mut start_link = String::new();
    let mut current_url = config.start_url.clone();
    let mut pages_fetched = 0usize;
    let mut state = FetchState::Fetching {
        url: config.start_url.clone(),
    };

    let reason = loop {
        let url = match state {
            FetchState::Done(reason) => break reason,
            FetchState::Fetching { url } => url,
        };

        info!("Fetching: {}", url);
        let page = source.fetch_page(&url).await?;
        pages_fetched += 1;
        current_url = url;

        let (rows, next) = match page.into_outcome() {
            PageOutcome::EndOfStream(cause) => {
                warn!("Treating page as end of data: {:?}", cause);
                state = FetchState::Done(StopReason::EndOfStream(cause));
                continue;
            }
            PageOutcome::Records { rows, next } => (rows, next),
        };

        sink.write_page(&rows)?;
        debug!("Wrote {} rows from page {}", rows.len(), pages_fetched);

        if pages_fetched == 1 {
            start_link = next.clone().unwrap_or_default();
        }

        // Records arrive newest first, so the first one bounds the page.
        let first_timestamp = rows.first().map(|row| row.timestamp.as_str()).unwrap_or_default();
        state = if first_timestamp.starts_with(&config.stop_date_prefix) {
            info!("Reached stop date {} at {}", config.stop_date_prefix, first_timestamp);
            FetchState::Done(StopReason::StopDateReached)
        } else {
            match next {
                Some(next_url) => FetchState::Fetching { url: next_url },
                None => FetchState::Done(StopReason::NoNextLink),
            }
        };
    };

    let summary = FetchSummary {
        start_link,
        stopped_on: current_url,
        pages_fetched,
        rows_written: sink.rows_written() - rows_before,
        reason,
    };
    info!(
        "Fetch finished after {} pages, {} rows: {:?}",
        summary.pages_fetched, summary.rows_written, summary.reason
    );
    Ok(summary)
}
