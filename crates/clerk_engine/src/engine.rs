use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::download::{DocumentFetcher, DocumentStore, DownloadError, DownloadSettings};
use crate::lookup::{HttpStatusLookup, LookupSettings};
use crate::persist::PersistError;
use crate::retry::{lookup_with_retry, RetryPolicy, TokioSleeper};
use crate::types::{LookupError, LookupOutcome, ProgressSink};

/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub portal_base_url: Url,
    pub download_dir: PathBuf,
    pub retry: RetryPolicy,
    pub lookup: LookupSettings,
    pub download: DownloadSettings,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("lookup client: {0}")]
    Lookup(#[from] LookupError),
    #[error("download: {0}")]
    Download(#[from] DownloadError),
    #[error("persist: {0}")]
    Persist(#[from] PersistError),
    #[error("runtime: {0}")]
    Runtime(String),
}

/// Synchronous facade over the async IO pipeline.
///
/// Owns the tokio runtime so the batch loop can stay a plain sequential
/// `for` over records; only this handle knows anything is async.
pub struct EngineHandle {
    runtime: tokio::runtime::Runtime,
    lookup: HttpStatusLookup,
    fetcher: DocumentFetcher,
    store: DocumentStore,
    retry: RetryPolicy,
    sleeper: TokioSleeper,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|err| EngineError::Runtime(err.to_string()))?;
        let lookup = HttpStatusLookup::new(config.portal_base_url, config.lookup)?;
        let fetcher = DocumentFetcher::new(config.download)?;
        let store = DocumentStore::new(config.download_dir);
        Ok(Self {
            runtime,
            lookup,
            fetcher,
            store,
            retry: config.retry,
            sleeper: TokioSleeper,
        })
    }

    /// Letter status with bounded retries. Never fails: transient
    /// exhaustion comes back as an outcome the caller records.
    pub fn check_letter(&self, number: &str, sink: &dyn ProgressSink) -> LookupOutcome {
        self.runtime.block_on(lookup_with_retry(
            &self.lookup,
            number,
            &self.retry,
            &self.sleeper,
            sink,
        ))
    }

    /// Download a signed document and store it atomically; returns the
    /// stored path.
    pub fn fetch_signed_document(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<PathBuf, EngineError> {
        let bytes = self.runtime.block_on(self.fetcher.download(url, sink))?;
        let path = self.store.store(url, &bytes, sink)?;
        Ok(path)
    }
}
