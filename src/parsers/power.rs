//! Power-monitor dump normalisation
//!
//! The monitor writes one semicolon-separated file per session with energy
//! counters accumulated over `duration`. Dividing each integer counter by the
//! duration gives average power for the sample.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, TelemetryError};
use crate::models::PowerReading;

const COLUMNS: [&str; 5] = ["timestamp", "duration", "CORE", "CPU", "DRAM"];

/// Normalise one monitor dump read from `reader`
pub fn parse_power_csv<R: Read>(reader: R, source_name: &str) -> Result<Vec<PowerReading>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut readings = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = index + 2;
        if record.len() < COLUMNS.len() {
            return Err(TelemetryError::parse(
                source_name,
                format!("line {}: expected {} columns, found {}", line, COLUMNS.len(), record.len()),
            ));
        }

        let duration: f64 = record[1]
            .parse()
            .map_err(|_| TelemetryError::parse(source_name, format!("line {}: bad duration {:?}", line, &record[1])))?;
        if duration == 0.0 {
            return Err(TelemetryError::parse(source_name, format!("line {}: zero duration", line)));
        }

        let field = |i: usize| normalise(&record[i], duration, source_name, line, COLUMNS[i]);
        readings.push(PowerReading {
            timestamp: record[0].to_string(),
            core: field(2)?,
            cpu: field(3)?,
            dram: field(4)?,
        });
    }
    Ok(readings)
}

/// Integer counters are divided by the duration, anything else is kept
fn normalise(raw: &str, duration: f64, source_name: &str, line: usize, column: &str) -> Result<Option<f64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(counter) = raw.parse::<i64>() {
        return Ok(Some(counter as f64 / duration));
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| TelemetryError::parse(source_name, format!("line {}: bad {} value {:?}", line, column, raw)))
}

/// List the `*.csv` files of `dir` in path order
pub fn csv_files_in<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "csv"))
        .collect();
    paths.sort();
    Ok(paths)
}

/// Read and concatenate every dump in `dir`
pub fn read_power_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<PowerReading>> {
    let mut readings = Vec::new();
    for path in csv_files_in(dir)? {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        info!("Reading {} ...", name);
        let file = std::fs::File::open(&path)?;
        readings.extend(parse_power_csv(file, &name)?);
    }
    Ok(readings)
}

pub fn write_power_csv<W: Write>(readings: &[PowerReading], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for reading in readings {
        writer.serialize(reading)?;
    }
    writer.flush()?;
    Ok(())
}
