//! Fetch Horizon ledger activity into a CSV file
//!
//! Rows are appended without a header as
//! `timestamp,operations,successful transactions,failed transactions`.
//! Running twice against the same file appends every row twice.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use stellar_telemetry::api::HorizonClient;
use stellar_telemetry::ledger_fetcher::{self, ActivitySink, FetchConfig};
use stellar_telemetry::models::Config;
use stellar_telemetry::utils::init_logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch Horizon ledger activity as CSV", long_about = None)]
struct Args {
    /// Path to file where to store results (appended to)
    output_fpath: PathBuf,

    /// URL to start fetching activity from
    #[arg(long, value_parser = parse_url)]
    url: Option<String>,

    /// Timestamp prefix at which to stop fetching, e.g. 2021-05-15T12.
    /// Matched with a plain starts-with against Horizon's `closed_at`.
    #[arg(long = "end-date")]
    end_date: Option<String>,
}

fn parse_url(raw: &str) -> std::result::Result<String, String> {
    url::Url::parse(raw)
        .map(|_| raw.to_string())
        .map_err(|e| format!("invalid URL {:?}: {}", raw, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("stellar_telemetry=info,fetch_ledger_activity=info");

    let mut config = Config::from_env()?;
    if let Some(url) = args.url {
        config.horizon_url = url;
    }
    if let Some(end_date) = args.end_date {
        config.stop_date_prefix = end_date;
    }

    info!("📒 Fetching ledger activity into {}", args.output_fpath.display());
    info!("📅 Stopping at ledgers closed at {}*", config.stop_date_prefix);

    let client = HorizonClient::new(&config)?;
    let mut sink = ActivitySink::open_append(&args.output_fpath)?;
    let summary = ledger_fetcher::run(&client, &FetchConfig::from_config(&config), &mut sink).await?;

    info!("✅ {} rows from {} pages", summary.rows_written, summary.pages_fetched);
    println!("{}", summary.report_lines());
    Ok(())
}
