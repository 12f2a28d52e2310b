//! CSV export of behavior records.
//!
//! Rows are built from the composite records the synchronizer yields; the
//! behavior column comes from the body-section extraction rather than the
//! single-line decode so multi-line entries survive into reports.

use chrono::NaiveDate;
use meritsync_domain::constants::EXPORT_COLUMNS;
use meritsync_domain::utils::record_text;
use meritsync_domain::utils::thai_date::format_thai_date;
use meritsync_domain::{BehaviorRecord, MeritSyncError, RecordStatus, Result};

/// UTF-8 byte order mark; common spreadsheet tools need it to render Thai
/// text correctly.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One CSV row, in [`EXPORT_COLUMNS`] order
pub type ExportRow = [String; EXPORT_COLUMNS.len()];

/// Build one row per record. Absent values become empty strings.
pub fn build_rows(records: &[BehaviorRecord]) -> Vec<ExportRow> {
    records.iter().map(build_row).collect()
}

fn build_row(record: &BehaviorRecord) -> ExportRow {
    [
        record.student_id.clone().unwrap_or_default(),
        record.student_number.map(|number| number.to_string()).unwrap_or_default(),
        record.full_name.clone().unwrap_or_default(),
        record.classroom.clone().unwrap_or_default(),
        record
            .body
            .as_deref()
            .and_then(record_text::extract_behavior_section)
            .unwrap_or_default(),
        record.score.map(format_score).unwrap_or_default(),
        record.teacher_name.clone().unwrap_or_default(),
        RecordStatus::display_label(record.status).to_string(),
        record.created_at.map(|at| format_thai_date(at.date_naive())).unwrap_or_default(),
        record.updated_at.map(|at| format_thai_date(at.date_naive())).unwrap_or_default(),
    ]
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        score.to_string()
    }
}

/// Serialize rows into a CSV byte stream: UTF-8 BOM, header row, one line
/// per row. Values are quoted only when they contain a separator or quote,
/// with internal quotes doubled.
///
/// # Errors
/// `EmptyExport` when there are no rows to serialize.
pub fn serialize(rows: &[ExportRow]) -> Result<Vec<u8>> {
    if rows.is_empty() {
        return Err(MeritSyncError::EmptyExport);
    }

    let mut buffer = Vec::from(UTF8_BOM);
    {
        let mut writer = csv::WriterBuilder::new().from_writer(&mut buffer);
        writer.write_record(EXPORT_COLUMNS).map_err(|e| csv_error(&e))?;
        for row in rows {
            writer.write_record(row).map_err(|e| csv_error(&e))?;
        }
        writer
            .flush()
            .map_err(|e| MeritSyncError::Internal(format!("CSV flush failed: {e}")))?;
    }

    Ok(buffer)
}

/// Filename for an export artifact: `<prefix>_<ISO date>.csv`.
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y-%m-%d"))
}

fn csv_error(error: &csv::Error) -> MeritSyncError {
    MeritSyncError::Internal(format!("CSV write failed: {error}"))
}
