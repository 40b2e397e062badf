//! Power report tables
//!
//! Reduces the normalised RAPL readings and the daily network traffic into
//! the three LaTeX tables of the report: RAPL power, per-factor summary and
//! total network power.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, TelemetryError};

pub mod stats;
pub mod tables;

pub use stats::{summarize, Summary};

/// kWh of transfer energy per GB
pub const GB_TO_KWH: f64 = 0.06;

/// Power usage effectiveness of the hosting facility
pub const DEFAULT_PUE: f64 = 1.67;
pub const DEFAULT_STORAGE_W: f64 = 6.5;
/// Validator count at the time of measurement
pub const DEFAULT_NODES: u32 = 132;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportParams {
    pub pue: f64,
    pub storage_w: f64,
    pub nodes: u32,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            pue: DEFAULT_PUE,
            storage_w: DEFAULT_STORAGE_W,
            nodes: DEFAULT_NODES,
        }
    }
}

/// Average power needed to move `gb` gigabytes over `hours`
pub fn gb_to_w(gb: f64, hours: f64) -> f64 {
    gb * GB_TO_KWH * 1000.0 / hours
}

/// Inclusive date window applied to input timestamps
#[derive(Debug, Clone, Copy, Default)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn contains(&self, timestamp: &str) -> bool {
        if self.start.is_none() && self.end.is_none() {
            return true;
        }
        let date = match timestamp.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()) {
            Some(date) => date,
            None => return false,
        };
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

#[derive(Debug, Deserialize)]
struct RaplRow {
    timestamp: String,
    #[serde(rename = "CPU")]
    cpu: Option<f64>,
    #[serde(rename = "DRAM")]
    dram: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TrafficRow {
    timestamp: String,
    rx: f64,
    tx: f64,
}

/// CPU and RAM power series, CORE dropped
#[derive(Debug, Clone, Default)]
pub struct RaplSeries {
    pub cpu: Vec<f64>,
    pub ram: Vec<f64>,
}

/// Read normalised power readings (`timestamp,CORE,CPU,DRAM`)
pub fn read_rapl_csv<P: AsRef<Path>>(path: P, window: &DateWindow) -> Result<RaplSeries> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut series = RaplSeries::default();
    for row in reader.deserialize::<RaplRow>() {
        let row = row?;
        if !window.contains(&row.timestamp) {
            continue;
        }
        series.cpu.push(row.cpu.unwrap_or(f64::NAN));
        series.ram.push(row.dram.unwrap_or(f64::NAN));
    }
    debug!("Read {} RAPL readings", series.cpu.len());
    Ok(series)
}

/// Read daily traffic (`timestamp,rx,tx` in bytes) as mean rx/tx power
pub fn read_daily_network_power<P: AsRef<Path>>(path: P, window: &DateWindow) -> Result<Vec<f64>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut power = Vec::new();
    for row in reader.deserialize::<TrafficRow>() {
        let row = row?;
        if !window.contains(&row.timestamp) {
            continue;
        }
        let rx = gb_to_w(row.rx * 1e-9, 24.0);
        let tx = gb_to_w(row.tx * 1e-9, 24.0);
        power.push((rx + tx) / 2.0);
    }
    debug!("Read {} daily traffic rows", power.len());
    Ok(power)
}

/// Render all three tables
pub fn build_report(rapl: &RaplSeries, network_power: &[f64], params: &ReportParams) -> Result<String> {
    let cpu = summarize(&rapl.cpu).ok_or_else(|| TelemetryError::parse("RAPL readings", "no CPU values"))?;
    let ram = summarize(&rapl.ram).ok_or_else(|| TelemetryError::parse("RAPL readings", "no RAM values"))?;
    let network =
        summarize(network_power).ok_or_else(|| TelemetryError::parse("network traffic", "no traffic values"))?;

    Ok(format!(
        "\n{}\n\n{}\n{}",
        tables::rapl_table(&cpu, &ram),
        tables::summary_table(&cpu, &ram, &network, params),
        tables::total_power_table(&cpu, &ram, &network, params),
    ))
}
