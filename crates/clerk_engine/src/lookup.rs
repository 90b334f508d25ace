use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::types::{LookupError, LookupFailureKind, LookupOutcome};

/// Marker substrings the portal uses in its status column.
const SIGNED_MARKER: &str = "Sudah TTE";
const REJECTED_MARKER: &str = "Ditolak";
const PENDING_MARKER: &str = "Diproses";

#[derive(Debug, Clone)]
pub struct LookupSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// One lookup attempt against the signing portal.
///
/// Implementations must be idempotent: the retry wrapper re-invokes the
/// same query after transient failures.
#[async_trait]
pub trait StatusLookup: Send + Sync {
    async fn lookup(&self, number: &str) -> Result<LookupOutcome, LookupError>;
}

/// One row of the portal's letter table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusRow {
    pub status: String,
    #[serde(default)]
    pub document_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    rows: Vec<StatusRow>,
}

/// Portal client: queries the letter-status endpoint and classifies the
/// returned rows.
#[derive(Debug, Clone)]
pub struct HttpStatusLookup {
    client: reqwest::Client,
    base_url: url::Url,
}

impl HttpStatusLookup {
    pub fn new(base_url: url::Url, settings: LookupSettings) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| LookupError::new(LookupFailureKind::Network, err.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, number: &str) -> Result<url::Url, LookupError> {
        let mut endpoint = self
            .base_url
            .join("surat/status")
            .map_err(|err| LookupError::new(LookupFailureKind::InvalidUrl, err.to_string()))?;
        endpoint.query_pairs_mut().append_pair("number", number);
        Ok(endpoint)
    }
}

#[async_trait]
impl StatusLookup for HttpStatusLookup {
    async fn lookup(&self, number: &str) -> Result<LookupOutcome, LookupError> {
        let endpoint = self.endpoint(number)?;
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::new(
                LookupFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body: StatusResponse = response.json().await.map_err(|err| {
            LookupError::new(LookupFailureKind::MalformedResponse, err.to_string())
        })?;
        Ok(classify_rows(&body.rows))
    }
}

/// Classify the portal's row set into an outcome.
///
/// Only the first row is inspected (the portal returns the best match
/// first). Status matching is containment, not equality, because the
/// portal decorates the text with dates and signer names.
pub fn classify_rows(rows: &[StatusRow]) -> LookupOutcome {
    let Some(row) = rows.first() else {
        return LookupOutcome::NotFound;
    };

    if row.status.contains(SIGNED_MARKER) {
        return match row.document_url.as_deref() {
            Some(url) if !url.is_empty() => LookupOutcome::Signed {
                document_url: url.to_string(),
            },
            // A signed letter without a download link cannot be acted on.
            _ => LookupOutcome::Unrecognized {
                status: row.status.clone(),
            },
        };
    }
    if row.status.contains(REJECTED_MARKER) {
        return LookupOutcome::Rejected;
    }
    if row.status.contains(PENDING_MARKER) {
        return LookupOutcome::Pending;
    }
    LookupOutcome::Unrecognized {
        status: row.status.clone(),
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        return LookupError::new(LookupFailureKind::Timeout, err.to_string());
    }
    LookupError::new(LookupFailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{classify_rows, StatusRow};
    use crate::types::LookupOutcome;

    fn row(status: &str, document_url: Option<&str>) -> StatusRow {
        StatusRow {
            status: status.to_string(),
            document_url: document_url.map(|u| u.to_string()),
        }
    }

    #[test]
    fn empty_row_set_is_not_found() {
        assert_eq!(classify_rows(&[]), LookupOutcome::NotFound);
    }

    #[test]
    fn signed_requires_a_document_url() {
        assert_eq!(
            classify_rows(&[row("Sudah TTE 2025-01-03", Some("https://x/surat.pdf"))]),
            LookupOutcome::Signed {
                document_url: "https://x/surat.pdf".to_string()
            }
        );
        assert_eq!(
            classify_rows(&[row("Sudah TTE", None)]),
            LookupOutcome::Unrecognized {
                status: "Sudah TTE".to_string()
            }
        );
    }

    #[test]
    fn only_the_first_row_counts() {
        let rows = [
            row("Ditolak oleh pejabat", None),
            row("Sudah TTE", Some("https://x/surat.pdf")),
        ];
        assert_eq!(classify_rows(&rows), LookupOutcome::Rejected);
    }

    #[test]
    fn pending_and_unknown_statuses() {
        assert_eq!(
            classify_rows(&[row("Masih Diproses", None)]),
            LookupOutcome::Pending
        );
        assert_eq!(
            classify_rows(&[row("Dikembalikan", None)]),
            LookupOutcome::Unrecognized {
                status: "Dikembalikan".to_string()
            }
        );
    }
}
