//! vnstat `--json` export conversion

use std::io::Write;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::error::{Result, TelemetryError};
use crate::models::TrafficSample;

/// Fixed UTC offset of the monitored host
const HOST_OFFSET: &str = "+02:00";

/// Which vnstat bucket list to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Granularity {
    Day,
    FiveMinute,
}

#[derive(Debug, Deserialize)]
struct VnstatExport {
    interfaces: Vec<Interface>,
}

#[derive(Debug, Deserialize)]
struct Interface {
    traffic: Traffic,
}

#[derive(Debug, Deserialize)]
struct Traffic {
    #[serde(default)]
    day: Vec<Bucket>,
    #[serde(default)]
    fiveminute: Vec<Bucket>,
}

#[derive(Debug, Deserialize)]
struct Bucket {
    date: BucketDate,
    time: Option<BucketTime>,
    rx: u64,
    tx: u64,
}

#[derive(Debug, Deserialize)]
struct BucketDate {
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Debug, Deserialize)]
struct BucketTime {
    hour: u32,
    minute: u32,
}

/// Convert the first interface's buckets into traffic samples
pub fn parse_vnstat_json(json: &str, granularity: Granularity) -> Result<Vec<TrafficSample>> {
    let export: VnstatExport =
        serde_json::from_str(json).map_err(|e| TelemetryError::parse("vnstat export", e.to_string()))?;
    let interface = export
        .interfaces
        .into_iter()
        .next()
        .ok_or_else(|| TelemetryError::parse("vnstat export", "no interfaces"))?;

    let buckets = match granularity {
        Granularity::Day => interface.traffic.day,
        Granularity::FiveMinute => interface.traffic.fiveminute,
    };

    buckets
        .into_iter()
        .map(|bucket| {
            Ok(TrafficSample {
                timestamp: bucket_timestamp(&bucket, granularity)?,
                rx: bucket.rx,
                tx: bucket.tx,
            })
        })
        .collect()
}

fn bucket_timestamp(bucket: &Bucket, granularity: Granularity) -> Result<String> {
    let d = &bucket.date;
    let date = NaiveDate::from_ymd_opt(d.year, d.month, d.day).ok_or_else(|| {
        TelemetryError::parse("vnstat export", format!("invalid date {}-{}-{}", d.year, d.month, d.day))
    })?;

    // Daily buckets have no time of day; pin them to noon.
    let time = match (granularity, &bucket.time) {
        (Granularity::Day, _) => NaiveTime::from_hms_opt(12, 0, 0),
        (Granularity::FiveMinute, Some(t)) => NaiveTime::from_hms_opt(t.hour, t.minute, 0),
        (Granularity::FiveMinute, None) => None,
    }
    .ok_or_else(|| TelemetryError::parse("vnstat export", format!("bucket on {} has no valid time", date)))?;

    Ok(format!("{} {}{}", date.format("%Y-%m-%d"), time.format("%H:%M:%S"), HOST_OFFSET))
}

pub fn read_vnstat_file<P: AsRef<Path>>(path: P, granularity: Granularity) -> Result<Vec<TrafficSample>> {
    let text = std::fs::read_to_string(path)?;
    parse_vnstat_json(&text, granularity)
}

/// Write `timestamp,rx,tx` rows with a header
pub fn write_traffic_csv<W: Write>(samples: &[TrafficSample], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for sample in samples {
        writer.serialize(sample)?;
    }
    if samples.is_empty() {
        writer.write_record(["timestamp", "rx", "tx"])?;
    }
    writer.flush()?;
    Ok(())
}
