///! CSV report export
///!
///! One row per record, in input order, using the nearest close approach.
///! Fields that contain a delimiter or quote are quoted by the CSV writer.

use chrono::NaiveDate;
use cosmic_common::NeoRecord;
use std::borrow::Borrow;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::risk::classify;
use crate::error::{Result, WatchError};

pub const REPORT_HEADERS: [&str; 6] = [
    "Object Designation",
    "Diameter (km)",
    "Miss Distance (km)",
    "Velocity (km/h)",
    "Risk Level",
    "Hazardous",
];

pub const REPORT_MIME_TYPE: &str = "text/csv";

pub fn report_file_name(date: NaiveDate) -> String {
    format!("neo_report_{}.csv", date.format("%Y-%m-%d"))
}

fn report_row(record: &NeoRecord) -> Result<[String; 6]> {
    let tier = classify(record)?;
    let approach = record.nearest_approach().ok_or_else(|| {
        WatchError::malformed(format!("{} has no close approach to export", record.id))
    })?;

    Ok([
        record.name.clone(),
        format!("{:.3}", record.diameter.max_km()),
        format!("{}", approach.miss_distance.kilometers().trunc() as u64),
        format!("{}", approach.velocity.kilometers_per_hour().trunc() as u64),
        tier.as_str().to_string(),
        if record.hazardous { "Yes" } else { "No" }.to_string(),
    ])
}

/// Write the report to any writer
pub fn write_report<W: Write, R: Borrow<NeoRecord>>(writer: W, records: &[R]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(REPORT_HEADERS)?;
    for record in records {
        csv_writer.write_record(report_row(record.borrow())?)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Render the report into a string
pub fn render_report<R: Borrow<NeoRecord>>(records: &[R]) -> Result<String> {
    let mut buffer = Vec::new();
    write_report(&mut buffer, records)?;
    String::from_utf8(buffer).map_err(|e| WatchError::Export(format!("Report is not UTF-8: {}", e)))
}

/// Write `neo_report_<date>.csv` into `dir`, creating it if needed
pub async fn export_to_dir<R: Borrow<NeoRecord>>(
    dir: impl AsRef<Path>,
    date: NaiveDate,
    records: &[R],
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let content = render_report(records)?;

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| WatchError::Export(format!("Failed to create {}: {}", dir.display(), e)))?;

    let path = dir.join(report_file_name(date));
    tokio::fs::write(&path, content)
        .await
        .map_err(|e| WatchError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(path)
}
