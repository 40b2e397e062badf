//! Print the LaTeX power tables for the report

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use stellar_telemetry::report::{
    build_report, read_daily_network_power, read_rapl_csv, DateWindow, ReportParams, DEFAULT_NODES,
    DEFAULT_PUE, DEFAULT_STORAGE_W,
};
use stellar_telemetry::utils::init_logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Print LaTeX tables for RAPL and network power", long_about = None)]
struct Args {
    /// Normalised power readings (timestamp,CORE,CPU,DRAM)
    #[arg(long, default_value = "data/cpu-ram.csv")]
    rapl: PathBuf,

    /// Daily network traffic (timestamp,rx,tx)
    #[arg(long, default_value = "data/network-traffic.csv")]
    network: PathBuf,

    /// First day of RAPL readings to include (YYYY-MM-DD)
    #[arg(long, default_value = "2021-05-13")]
    from: Option<NaiveDate>,

    /// Last day of RAPL readings to include (YYYY-MM-DD)
    #[arg(long, default_value = "2021-06-01")]
    to: Option<NaiveDate>,

    #[arg(long, default_value_t = DEFAULT_PUE)]
    pue: f64,

    /// Storage power per node in watts
    #[arg(long, default_value_t = DEFAULT_STORAGE_W)]
    storage: f64,

    /// Number of nodes in the network
    #[arg(long, default_value_t = DEFAULT_NODES)]
    nodes: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("stellar_telemetry=info");

    let window = DateWindow {
        start: args.from,
        end: args.to,
    };
    let rapl = read_rapl_csv(&args.rapl, &window)
        .with_context(|| format!("reading {}", args.rapl.display()))?;
    let network = read_daily_network_power(&args.network, &DateWindow::default())
        .with_context(|| format!("reading {}", args.network.display()))?;

    let params = ReportParams {
        pue: args.pue,
        storage_w: args.storage,
        nodes: args.nodes,
    };
    println!("{}", build_report(&rapl, &network, &params)?);
    Ok(())
}
