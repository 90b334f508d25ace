use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

/// One letter reconciliation result for the status report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub nip: String,
    pub letter_date: String,
    pub letter_number: String,
    pub status: String,
}

/// One unrecoverable per-record failure for the failure log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureEntry {
    pub nip: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(String),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Serialize)]
struct StatusRecord<'a> {
    #[serde(rename = "No")]
    number: String,
    #[serde(rename = "NIP")]
    nip: String,
    #[serde(rename = "Total Surat")]
    total: String,
    #[serde(rename = "Tanggal Surat")]
    letter_date: &'a str,
    #[serde(rename = "Nomor Surat")]
    letter_number: &'a str,
    #[serde(rename = "Status")]
    status: &'a str,
}

#[derive(Debug, Serialize)]
struct FailureRecord<'a> {
    #[serde(rename = "NIP")]
    nip: &'a str,
    #[serde(rename = "Keterangan")]
    reason: &'a str,
}

/// Write the per-letter status report.
///
/// Rows are grouped by NIP the way the operators read the sheet: the
/// first row of each group carries a running number, the NIP and the
/// group's row count; continuation rows leave those columns blank.
/// Grouping follows the entry order, which the batch loop keeps
/// contiguous per employee.
pub fn write_status_report(
    dir: &Path,
    filename: &str,
    entries: &[StatusEntry],
) -> Result<PathBuf, ReportError> {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *totals.entry(entry.nip.as_str()).or_default() += 1;
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    if entries.is_empty() {
        writer
            .write_record([
                "No",
                "NIP",
                "Total Surat",
                "Tanggal Surat",
                "Nomor Surat",
                "Status",
            ])
            .map_err(|err| ReportError::Csv(err.to_string()))?;
    }

    let mut running = 0usize;
    let mut last_nip: Option<&str> = None;
    for entry in entries {
        let group_head = last_nip != Some(entry.nip.as_str());
        let record = if group_head {
            running += 1;
            last_nip = Some(entry.nip.as_str());
            StatusRecord {
                number: running.to_string(),
                nip: entry.nip.clone(),
                total: totals[entry.nip.as_str()].to_string(),
                letter_date: &entry.letter_date,
                letter_number: &entry.letter_number,
                status: &entry.status,
            }
        } else {
            StatusRecord {
                number: String::new(),
                nip: String::new(),
                total: String::new(),
                letter_date: &entry.letter_date,
                letter_number: &entry.letter_number,
                status: &entry.status,
            }
        };
        writer
            .serialize(record)
            .map_err(|err| ReportError::Csv(err.to_string()))?;
    }

    finish(writer, dir, filename)
}

/// Write the failure log. The header is always present, even for an
/// empty log, so downstream tooling never chokes on a zero-byte file.
pub fn write_failure_log(
    dir: &Path,
    filename: &str,
    entries: &[FailureEntry],
) -> Result<PathBuf, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if entries.is_empty() {
        writer
            .write_record(["NIP", "Keterangan"])
            .map_err(|err| ReportError::Csv(err.to_string()))?;
    }
    for entry in entries {
        writer
            .serialize(FailureRecord {
                nip: &entry.nip,
                reason: &entry.reason,
            })
            .map_err(|err| ReportError::Csv(err.to_string()))?;
    }

    finish(writer, dir, filename)
}

fn finish(
    writer: csv::Writer<Vec<u8>>,
    dir: &Path,
    filename: &str,
) -> Result<PathBuf, ReportError> {
    let bytes = writer
        .into_inner()
        .map_err(|err| ReportError::Csv(err.to_string()))?;
    let out = AtomicFileWriter::new(dir.to_path_buf());
    Ok(out.write(filename, &bytes)?)
}
