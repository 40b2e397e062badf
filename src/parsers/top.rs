//! `top -b` capture parsing
//!
//! A capture is a sequence of snapshots, each starting with the
//! `top - HH:MM:SS up ...` summary line. Only the CPU split, memory usage and
//! the stellar-core / postgres process rows are kept.

use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, TelemetryError};
use crate::models::TopSample;

pub const TOP_CSV_HEADER: [&str; 10] = [
    "timestamp",
    "CPU US",
    "CPU SY",
    "CPU ID",
    "MEM USED",
    "MEM BUFF",
    "Stellar CPU%",
    "Stellar MEM%",
    "PGSQL CPU%",
    "PGSQL MEM%",
];

const CPU_COLUMN: usize = 8;
const MEM_COLUMN: usize = 9;

/// Parse every complete snapshot in `text`, stamping rows with `date`
pub fn parse_top_output(text: &str, date: &str) -> Vec<TopSample> {
    split_snapshots(text)
        .into_iter()
        .enumerate()
        .filter_map(|(index, lines)| match parse_snapshot(&lines, date) {
            Ok(sample) => Some(sample),
            Err(reason) => {
                warn!("Skipping snapshot {} for {}: {}", index, date, reason);
                None
            }
        })
        .collect()
}

/// Read a capture file named after its date, e.g. `2021-05-20.txt`
pub fn read_top_file<P: AsRef<Path>>(path: P) -> Result<Vec<TopSample>> {
    let path = path.as_ref();
    let date = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| TelemetryError::parse(&path.display().to_string(), "file name carries no date"))?
        .to_string();

    let text = std::fs::read_to_string(path)?;
    let samples = parse_top_output(&text, &date);
    debug!("Parsed {} snapshots from {}", samples.len(), path.display());
    Ok(samples)
}

/// Write the header row followed by one row per sample
pub fn write_top_csv<W: Write>(samples: &[TopSample], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(TOP_CSV_HEADER)?;
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}

fn split_snapshots(text: &str) -> Vec<Vec<&str>> {
    let mut snapshots: Vec<Vec<&str>> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.starts_with("top") {
            snapshots.push(vec![line]);
        } else if let Some(current) = snapshots.last_mut() {
            current.push(line);
        }
    }
    snapshots
}

fn parse_snapshot(lines: &[&str], date: &str) -> std::result::Result<TopSample, String> {
    let time = lines
        .first()
        .and_then(|header| header.split(' ').nth(2))
        .ok_or("summary line has no time")?;

    let cpu_line = find_line(lines, |l| l.starts_with("%Cpu")).ok_or("no %Cpu line")?;
    let cpu = labelled_values(cpu_line);
    let mem_line = find_line(lines, |l| l.starts_with("MiB Mem")).ok_or("no MiB Mem line")?;
    let mem = labelled_values(mem_line);

    let table_start = lines
        .iter()
        .position(|l| l.contains("PID"))
        .ok_or("no process table")?;
    let processes = &lines[table_start + 1..];

    let (stellar_cpu, stellar_mem) = process_usage(processes, "stellar");
    let (pgsql_cpu, pgsql_mem) = process_usage(processes, "postgres");

    Ok(TopSample {
        timestamp: format!("{} {}", date, time),
        cpu_us: lookup(&cpu, "us")?,
        cpu_sy: lookup(&cpu, "sy")?,
        cpu_id: lookup(&cpu, "id")?,
        mem_used: lookup(&mem, "used")?,
        mem_buff: lookup(&mem, "buff/cache")?,
        stellar_cpu,
        stellar_mem,
        pgsql_cpu,
        pgsql_mem,
    })
}

fn find_line<'a>(lines: &[&'a str], pred: impl Fn(&str) -> bool) -> Option<&'a str> {
    lines.iter().copied().find(|l| pred(l))
}

/// Split `Label: 1.0 a, 2.0 b, ...` into `(b, "2.0")` style pairs
fn labelled_values(line: &str) -> Vec<(String, String)> {
    let body = line.split_once(':').map(|(_, rest)| rest).unwrap_or(line);
    body.split(',')
        .filter_map(|segment| {
            let mut parts = segment.split_whitespace();
            let value = parts.next()?;
            let label = parts.next()?;
            Some((label.trim_end_matches('.').to_string(), value.to_string()))
        })
        .collect()
}

fn lookup(values: &[(String, String)], label: &str) -> std::result::Result<String, String> {
    values
        .iter()
        .find(|(l, _)| l == label)
        .map(|(_, v)| v.clone())
        .ok_or_else(|| format!("missing '{}' field", label))
}

fn process_usage(processes: &[&str], needle: &str) -> (Option<String>, Option<String>) {
    let row = processes.iter().find(|line| line.contains(needle));
    match row {
        Some(line) => {
            let columns: Vec<&str> = line.split_whitespace().collect();
            (
                columns.get(CPU_COLUMN).map(|s| s.to_string()),
                columns.get(MEM_COLUMN).map(|s| s.to_string()),
            )
        }
        None => (None, None),
    }
}
