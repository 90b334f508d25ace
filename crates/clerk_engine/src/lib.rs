//! Clerk engine: portal IO and batch plumbing.
//!
//! The signing-portal lookup (with its retry wrapper), signed-document
//! download and storage, decree-folder matching, CSV ingestion and the
//! report writers live here. `clerk_core` stays pure; this crate owns
//! every side effect.
mod decree;
mod download;
mod engine;
mod ingest;
mod lookup;
mod persist;
mod report;
mod retry;
mod types;

pub use decree::{decree_file_regex, find_decree_file};
pub use download::{
    document_filename, DocumentFetcher, DocumentStore, DownloadError, DownloadSettings,
};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use ingest::{normalize_date, read_rows, IngestError};
pub use lookup::{classify_rows, HttpStatusLookup, LookupSettings, StatusLookup, StatusRow};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use report::{
    write_failure_log, write_status_report, FailureEntry, ReportError, StatusEntry,
};
pub use retry::{lookup_with_retry, RetryPolicy, Sleeper, TokioSleeper};
pub use types::{
    EngineEvent, LookupError, LookupFailureKind, LookupOutcome, NullSink, ProgressSink,
};
