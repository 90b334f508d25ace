use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use clerk_core::EmployeeRow;

/// Day-first formats the spreadsheets are known to carry, tried in
/// order. ISO comes last: it is unambiguous, so order does not matter
/// for it, but the sheets are exported day-first.
const DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"];

/// The format every date field is rendered in for the target forms.
const FORM_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
    #[error("row {row}: {message}")]
    Row { row: usize, message: String },
    #[error("unparseable date: {0:?}")]
    Date(String),
}

/// Read all employee rows from a CSV file with headers.
///
/// The whole file is read up front: a malformed row should stop the
/// batch before any portal traffic happens, not halfway through.
pub fn read_rows(path: &Path) -> Result<Vec<EmployeeRow>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|err| IngestError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<EmployeeRow>().enumerate() {
        // +2: one for the header line, one because enumerate is 0-based.
        let row = result.map_err(|err| IngestError::Row {
            row: index + 2,
            message: err.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// Parse a day-first spreadsheet date and render the form format.
pub fn normalize_date(raw: &str) -> Result<String, IngestError> {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format(FORM_DATE_FORMAT).to_string());
        }
    }
    Err(IngestError::Date(trimmed.to_string()))
}
