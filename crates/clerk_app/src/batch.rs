use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use url::Url;

use clerk_core::{build_entry_plan, OrgKeywords};
use clerk_engine::{
    find_decree_file, normalize_date, read_rows, write_failure_log, write_status_report,
    DownloadSettings, EngineConfig, EngineEvent, EngineHandle, FailureEntry, LookupOutcome,
    LookupSettings, ProgressSink, RetryPolicy, StatusEntry,
};
use clerk_logging::{clerk_debug, clerk_info, clerk_warn, LogDestination};

use crate::config::{load_config, ConfigSource};

/// Totals for the final summary log line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub signed: usize,
    pub failures: usize,
}

/// Routes engine progress into the combined terminal+file log.
struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::LookupStarted { number, attempt } => {
                clerk_debug!("lookup {} attempt {}", number, attempt);
            }
            EngineEvent::LookupRetrying {
                number,
                attempt,
                delay,
            } => {
                clerk_warn!(
                    "lookup {} failed on attempt {}, retrying in {:?}",
                    number,
                    attempt,
                    delay
                );
            }
            // Per-chunk byte counts are too chatty for the batch log.
            EngineEvent::DownloadProgress { .. } => {}
            EngineEvent::DocumentStored { url, filename } => {
                clerk_info!("stored {} as {}", url, filename);
            }
        }
    }
}

/// Run the whole batch: one sequential pass over the spreadsheet rows,
/// then the reports.
pub fn run(config_path: &Path) -> anyhow::Result<BatchSummary> {
    let loaded = load_config(config_path)?;
    let config = loaded.config;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("creating log dir {:?}", config.log_dir))?;
    let log_path = config.log_dir.join(format!("clerk_{timestamp}.log"));
    clerk_logging::initialize(LogDestination::Both(&log_path));

    match &loaded.source {
        ConfigSource::File(path) => clerk_info!("configuration loaded from {:?}", path),
        ConfigSource::Defaults => {
            clerk_warn!("no configuration file at {:?}, using defaults", config_path)
        }
    }
    clerk_info!("terminal output is duplicated into {:?}", log_path);

    let rows = read_rows(&config.input_csv)?;
    clerk_info!("loaded {} rows from {:?}", rows.len(), config.input_csv);

    let engine = EngineHandle::new(EngineConfig {
        portal_base_url: Url::parse(&config.portal_base_url)
            .with_context(|| format!("invalid portal base url {:?}", config.portal_base_url))?,
        download_dir: config.download_dir.clone(),
        retry: RetryPolicy {
            max_attempts: config.max_attempts,
            initial_delay: Duration::from_secs(config.initial_delay_secs),
        },
        lookup: LookupSettings {
            request_timeout: Duration::from_secs(config.lookup_timeout_secs),
            ..LookupSettings::default()
        },
        download: DownloadSettings {
            request_timeout: Duration::from_secs(config.download_timeout_secs),
            max_bytes: config.max_document_bytes,
            ..DownloadSettings::default()
        },
    })?;

    let keywords = OrgKeywords::default();
    let sink = LogSink;
    let mut statuses: Vec<StatusEntry> = Vec::new();
    let mut failures: Vec<FailureEntry> = Vec::new();
    let mut signed = 0usize;

    for (index, row) in rows.iter().enumerate() {
        let plan = build_entry_plan(row, &keywords);
        clerk_info!(
            "row {}/{} nip {} [{}] {}",
            index + 1,
            rows.len(),
            plan.nip,
            plan.job_category.as_str(),
            plan.job_name
        );

        let letter_date = match normalize_date(&row.spmt_date) {
            Ok(date) => date,
            Err(err) => {
                failures.push(FailureEntry {
                    nip: plan.nip.clone(),
                    reason: format!("Tanggal SPMT: {err}"),
                });
                row.spmt_date.trim().to_string()
            }
        };

        match plan.decree.file_code.as_deref() {
            Some(code) => match find_decree_file(&config.decree_dir, code) {
                Ok(Some(path)) => clerk_info!("decree file for kode {}: {:?}", code, path),
                Ok(None) => {
                    clerk_warn!("no decree file for kode {}", code);
                    failures.push(FailureEntry {
                        nip: plan.nip.clone(),
                        reason: format!("file SPMT dengan kode {code} tidak ditemukan"),
                    });
                }
                Err(err) => {
                    failures.push(FailureEntry {
                        nip: plan.nip.clone(),
                        reason: format!("folder SPMT tidak terbaca: {err}"),
                    });
                }
            },
            None => {
                failures.push(FailureEntry {
                    nip: plan.nip.clone(),
                    reason: format!("format No.SPMT tidak valid: {}", plan.decree.number),
                });
            }
        }

        let outcome = engine.check_letter(&plan.decree.number, &sink);
        let status_text = match &outcome {
            LookupOutcome::Signed { document_url } => {
                match engine.fetch_signed_document(document_url, &sink) {
                    Ok(path) => {
                        signed += 1;
                        clerk_info!("signed document stored at {:?}", path);
                        "Berhasil didownload".to_string()
                    }
                    Err(err) => {
                        failures.push(FailureEntry {
                            nip: plan.nip.clone(),
                            reason: format!("gagal download surat TTD: {err}"),
                        });
                        format!("Gagal download: {err}")
                    }
                }
            }
            LookupOutcome::TransientError { .. } => {
                let label = outcome.label();
                failures.push(FailureEntry {
                    nip: plan.nip.clone(),
                    reason: label.clone(),
                });
                label
            }
            other => {
                clerk_info!("letter {}: {}", plan.decree.number, other.label());
                other.label()
            }
        };

        statuses.push(StatusEntry {
            nip: plan.nip.clone(),
            letter_date,
            letter_number: plan.decree.number.clone(),
            status: status_text,
        });
    }

    let status_path = write_status_report(
        &config.report_dir,
        &format!("status_{timestamp}.csv"),
        &statuses,
    )?;
    clerk_info!("status report written to {:?}", status_path);

    if failures.is_empty() {
        clerk_info!("no failures recorded");
    } else {
        let failure_path = write_failure_log(
            &config.report_dir,
            &format!("failures_{timestamp}.csv"),
            &failures,
        )?;
        clerk_warn!("{} failures recorded in {:?}", failures.len(), failure_path);
    }

    let summary = BatchSummary {
        processed: rows.len(),
        signed,
        failures: failures.len(),
    };
    clerk_info!(
        "finished: {} rows processed, {} signed documents downloaded, {} failures",
        summary.processed,
        summary.signed,
        summary.failures
    );
    Ok(summary)
}
