//! Write change records and raw observations.
//!
//! Everything is written in one shot to any `Write` (stdout in practice), so a
//! failure never leaves a half-written array behind a success exit code.

use std::io::Write;

use crate::domain::{ChangeRecord, Observation, OutputFormat};
use crate::error::AppError;

pub fn write_records<W: Write>(out: &mut W, records: &[ChangeRecord], format: OutputFormat) -> Result<(), AppError> {
    let buf = match format {
        OutputFormat::Json => records_json(records)?,
        OutputFormat::Csv => records_csv(records),
    };
    out.write_all(buf.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| AppError::output(format!("Failed to write output: {e}")))
}

/// Dump observations as a JSON array, the format `FileSource` reads back.
pub fn write_observations<W: Write>(out: &mut W, observations: &[Observation]) -> Result<(), AppError> {
    let mut buf = serde_json::to_string_pretty(observations)
        .map_err(|e| AppError::output(format!("Failed to serialize observations: {e}")))?;
    buf.push('\n');
    out.write_all(buf.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| AppError::output(format!("Failed to write output: {e}")))
}

fn records_json(records: &[ChangeRecord]) -> Result<String, AppError> {
    let mut buf = serde_json::to_string(records)
        .map_err(|e| AppError::output(format!("Failed to serialize records: {e}")))?;
    buf.push('\n');
    Ok(buf)
}

fn records_csv(records: &[ChangeRecord]) -> String {
    let mut buf = String::from("date,value,change,series_id,label\n");
    for r in records {
        buf.push_str(&format!(
            "{},{},{:.1},{},{}\n",
            r.date,
            r.value,
            r.change,
            csv_field(&r.series_id),
            csv_field(r.label.as_deref().unwrap_or("")),
        ));
    }
    buf
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
