//! Normalise power-monitor dumps to watts

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use stellar_telemetry::parsers::{read_power_dir, write_power_csv};
use stellar_telemetry::utils::{init_logging, output_writer};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert power-manager output to CORE, CPU and RAM power consumption",
    long_about = None
)]
struct Args {
    /// Directory holding the power-monitoring dumps, e.g. ./data/power-monitoring-db
    #[arg(long = "input-dir")]
    input_dir: PathBuf,

    /// Path to file where to store results (stdout if omitted)
    #[arg(long = "output-csv")]
    output_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("stellar_telemetry=info");

    if !args.input_dir.is_dir() {
        bail!("{} is not a directory", args.input_dir.display());
    }

    let readings = read_power_dir(&args.input_dir)?;
    info!("⚡ Normalised {} power readings", readings.len());

    let writer = output_writer(args.output_csv.as_deref())?;
    write_power_csv(&readings, writer)?;
    Ok(())
}
