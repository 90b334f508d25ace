use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Outcome of a signing-portal letter lookup.
///
/// Everything the portal can say about a letter is a value here, not an
/// error: the batch loop decides what each outcome means for a record.
/// Only [`LookupOutcome::TransientError`] implies the question itself
/// went unanswered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The letter is signed and the portal exposes the signed document.
    Signed { document_url: String },
    /// The letter was rejected by the signer.
    Rejected,
    /// The letter is still in the signing queue.
    Pending,
    /// The portal has no row for the letter number.
    NotFound,
    /// The portal returned a status text outside the known set.
    Unrecognized { status: String },
    /// All attempts failed on transient errors.
    TransientError { detail: String, attempts: u32 },
}

impl LookupOutcome {
    /// Status text used in the batch report, in the vocabulary the
    /// operators already know from the portal.
    pub fn label(&self) -> String {
        match self {
            LookupOutcome::Signed { .. } => "Sudah TTE".to_string(),
            LookupOutcome::Rejected => "Ditolak".to_string(),
            LookupOutcome::Pending => "Masih Diproses".to_string(),
            LookupOutcome::NotFound => "Nomor surat tidak ditemukan".to_string(),
            LookupOutcome::Unrecognized { status } => {
                format!("Status tidak dikenali: {status}")
            }
            LookupOutcome::TransientError { detail, attempts } => {
                format!("Error setelah {attempts} percobaan: {detail}")
            }
        }
    }
}

/// A single failed lookup attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct LookupError {
    pub kind: LookupFailureKind,
    pub message: String,
}

impl LookupError {
    pub fn new(kind: LookupFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// What went wrong inside one lookup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
}

impl fmt::Display for LookupFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupFailureKind::InvalidUrl => write!(f, "invalid url"),
            LookupFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            LookupFailureKind::Timeout => write!(f, "timeout"),
            LookupFailureKind::Network => write!(f, "network error"),
            LookupFailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// Progress notifications emitted by engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A lookup attempt is starting.
    LookupStarted { number: String, attempt: u32 },
    /// The previous attempt failed transiently; the engine waits `delay`
    /// before attempt `attempt + 1`.
    LookupRetrying {
        number: String,
        attempt: u32,
        delay: Duration,
    },
    /// Running byte count while a document body streams in.
    DownloadProgress { url: String, bytes: u64 },
    /// A downloaded document was written to the store.
    DocumentStored { url: String, filename: String },
}

/// Receiver for engine progress events. Passed explicitly through the
/// call chain instead of mutating any process-wide output stream.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: EngineEvent) {}
}
