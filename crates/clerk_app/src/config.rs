use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Batch configuration, loaded from a RON file.
///
/// Every field has a default so a partial file only overrides what it
/// names. The default paths mirror the folder layout the operators
/// already use around the spreadsheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Spreadsheet with one record per employee.
    pub input_csv: PathBuf,
    /// Flat folder holding the decree (SPMT) documents.
    pub decree_dir: PathBuf,
    /// Where downloaded signed documents are stored.
    pub download_dir: PathBuf,
    /// Where the status report and failure log are written.
    pub report_dir: PathBuf,
    /// Where the duplicated terminal log is written.
    pub log_dir: PathBuf,
    /// Signing-portal base URL.
    pub portal_base_url: String,
    /// Total lookup attempts per letter, including the first.
    pub max_attempts: u32,
    /// Wait before the second lookup attempt; doubles per retry.
    pub initial_delay_secs: u64,
    pub lookup_timeout_secs: u64,
    pub download_timeout_secs: u64,
    pub max_document_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_csv: PathBuf::from("data_jabatan.csv"),
            decree_dir: PathBuf::from("spmt"),
            download_dir: PathBuf::from("hasil_download"),
            report_dir: PathBuf::from("log"),
            log_dir: PathBuf::from("log_terminal"),
            portal_base_url: "https://suradi.malangkota.go.id".to_string(),
            max_attempts: 3,
            initial_delay_secs: 5,
            lookup_timeout_secs: 30,
            download_timeout_secs: 60,
            max_document_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: ConfigSource,
}

/// Load the configuration, falling back to defaults when the file does
/// not exist. A present-but-invalid file is fatal: silently running the
/// batch against default paths would be worse than stopping.
pub fn load_config(path: &Path) -> anyhow::Result<LoadedConfig> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let config = ron::from_str(&content)
                .with_context(|| format!("parsing configuration {path:?}"))?;
            Ok(LoadedConfig {
                config,
                source: ConfigSource::File(path.to_path_buf()),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(LoadedConfig {
            config: AppConfig::default(),
            source: ConfigSource::Defaults,
        }),
        Err(err) => Err(err).with_context(|| format!("reading configuration {path:?}")),
    }
}
