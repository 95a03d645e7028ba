//! Raw Record Export
//!
//! Serializes raw records to comma-delimited text for user download. The
//! header carries the 16 raw field names in documented order; keep the
//! order stable for compatibility with prior exports.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::logic::record::RawRecord;

/// Raw field names in export order. Data-export contract, not protocol.
pub const EXPORT_FIELDS: &[&str] = &[
    "age",
    "bmi",
    "waist_to_hip_ratio",
    "physical_activity_minutes_per_week",
    "screen_time_hours_per_day",
    "sleep_hours_per_day",
    "systolic_bp",
    "diastolic_bp",
    "heart_rate",
    "cholesterol_total",
    "hdl_cholesterol",
    "ldl_cholesterol",
    "triglycerides",
    "family_history_diabetes",
    "cardiovascular_history",
    "hypertension_history",
];

/// Render one record as a delimited row in EXPORT_FIELDS order
fn to_row(record: &RawRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        record.age,
        record.bmi,
        record.waist_to_hip_ratio,
        record.physical_activity_minutes_per_week,
        record.screen_time_hours_per_day,
        record.sleep_hours_per_day,
        record.systolic_bp,
        record.diastolic_bp,
        record.heart_rate,
        record.cholesterol_total,
        record.hdl_cholesterol,
        record.ldl_cholesterol,
        record.triglycerides,
        record.family_history_diabetes,
        record.cardiovascular_history,
        record.hypertension_history,
    )
}

/// Render a batch as CSV text (header + one row per record)
pub fn to_csv(records: &[RawRecord]) -> String {
    let mut out = String::new();
    out.push_str(&EXPORT_FIELDS.join(","));
    out.push('\n');
    for record in records {
        out.push_str(&to_row(record));
        out.push('\n');
    }
    out
}

/// Write a batch of records to a CSV file
pub fn write_csv(records: &[RawRecord], target_path: &Path) -> io::Result<()> {
    let mut file = File::create(target_path)?;
    file.write_all(to_csv(records).as_bytes())?;
    file.flush()?;
    log::info!(
        "Exported {} record(s) to {}",
        records.len(),
        target_path.display()
    );
    Ok(())
}
