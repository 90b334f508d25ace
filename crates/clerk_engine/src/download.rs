use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::types::{EngineEvent, ProgressSink};

#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid document url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("document too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("network error: {0}")]
    Network(String),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Streams signed documents from the portal.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: reqwest::Client,
    settings: DownloadSettings,
}

impl DocumentFetcher {
    pub fn new(settings: DownloadSettings) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| DownloadError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    /// Fetch the document body, enforcing the byte cap while streaming.
    pub async fn download(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<u8>, DownloadError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| DownloadError::InvalidUrl(err.to_string()))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus(status.as_u16()));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(DownloadError::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(DownloadError::TooLarge {
                    max_bytes: self.settings.max_bytes,
                    actual: Some(next_len),
                });
            }
            bytes.extend_from_slice(&chunk);
            sink.emit(EngineEvent::DownloadProgress {
                url: url.to_string(),
                bytes: bytes.len() as u64,
            });
        }

        Ok(bytes)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DownloadError {
    if err.is_timeout() {
        return DownloadError::Timeout(err.to_string());
    }
    DownloadError::Network(err.to_string())
}

/// Writes downloaded documents into the download directory, atomically.
pub struct DocumentStore {
    writer: AtomicFileWriter,
}

impl DocumentStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub fn store(
        &self,
        url: &str,
        bytes: &[u8],
        sink: &dyn ProgressSink,
    ) -> Result<PathBuf, PersistError> {
        let filename = document_filename(url);
        let path = self.writer.write(&filename, bytes)?;
        sink.emit(EngineEvent::DocumentStored {
            url: url.to_string(),
            filename,
        });
        Ok(path)
    }
}

/// Filename for a downloaded document: the URL's last path segment,
/// sanitized for filesystem use; a short URL hash stands in when the
/// segment is unusable.
pub fn document_filename(url: &str) -> String {
    let segment = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("");

    let sanitized = sanitize_segment(segment);
    if sanitized.is_empty() {
        format!("surat--{}.pdf", short_hash(url))
    } else {
        sanitized
    }
}

fn sanitize_segment(input: &str) -> String {
    let mut cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if cleaned.len() > 120 {
        cleaned.truncate(120);
    }
    if is_reserved_windows_name(&cleaned) {
        cleaned.push('_');
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::document_filename;

    #[test]
    fn takes_the_last_path_segment() {
        assert_eq!(
            document_filename("https://portal/files/surat_123.pdf"),
            "surat_123.pdf"
        );
    }

    #[test]
    fn drops_query_and_fragment() {
        assert_eq!(
            document_filename("https://portal/files/surat.pdf?download=1#top"),
            "surat.pdf"
        );
    }

    #[test]
    fn unusable_segment_falls_back_to_a_hash_name() {
        let name = document_filename("https://portal/files/...///");
        assert!(name.starts_with("surat--"));
        assert!(name.ends_with(".pdf"));

        // Deterministic for the same URL.
        assert_eq!(name, document_filename("https://portal/files/...///"));
    }

    #[test]
    fn reserved_windows_names_are_patched() {
        assert_eq!(document_filename("https://portal/files/CON"), "CON_");
    }
}
