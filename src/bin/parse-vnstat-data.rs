//! Convert a vnstat JSON export to `timestamp,rx,tx` CSV

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use stellar_telemetry::parsers::{read_vnstat_file, write_traffic_csv, Granularity};
use stellar_telemetry::utils::{init_logging, output_writer};

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse output from vnstat json output", long_about = None)]
struct Args {
    /// Path to JSON file with source data
    #[arg(long = "input-file")]
    input_file: PathBuf,

    /// Path to csv file to save results in (stdout if omitted)
    #[arg(long = "output-file")]
    output_file: Option<PathBuf>,

    /// Bucket size to export
    #[arg(long, value_enum, default_value_t = Granularity::Day)]
    granularity: Granularity,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("stellar_telemetry=info");

    let samples = read_vnstat_file(&args.input_file, args.granularity)?;
    info!("📶 {} {:?} buckets read from {}", samples.len(), args.granularity, args.input_file.display());

    let writer = output_writer(args.output_file.as_deref())?;
    write_traffic_csv(&samples, writer)?;
    Ok(())
}
