//! Convert `top -b` captures to CSV on stdout
//!
//! Each input file is named after the day it covers (`2021-05-20.txt`).

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use stellar_telemetry::parsers::{read_top_file, write_top_csv};
use stellar_telemetry::utils::init_logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse output from top files, printed to stdout", long_about = None)]
struct Args {
    /// List of files to take as input
    #[arg(long = "input-files", num_args = 1.., required = true)]
    input_files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("stellar_telemetry=info");

    let (files, skipped): (Vec<_>, Vec<_>) = args.input_files.into_iter().partition(|path| path.is_file());
    for path in &skipped {
        warn!("Skipping {}: not a file", path.display());
    }

    let mut samples = Vec::new();
    for path in &files {
        samples.extend(read_top_file(path)?);
    }

    // The header goes out even when there is nothing to parse.
    write_top_csv(&samples, io::stdout().lock())?;
    if files.is_empty() {
        println!("Expected at least one file as argument");
    }
    Ok(())
}
