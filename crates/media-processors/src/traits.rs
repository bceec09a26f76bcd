use crate::types::{AcquisitionJob, PollState, SearchQuery, SearchResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend is not configured")]
    NotConfigured,
    #[error("Backend is unavailable: {0}")]
    Unavailable(Box<dyn std::error::Error + Send + Sync>),
    #[error("Backend reported an error: {0}")]
    Rejected(String),
    #[error("Backend timed out: {0}")]
    Timeout(String),
    #[error("Backend call was cancelled")]
    Cancelled,
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BackendError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BackendError::Cancelled)
    }
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, BackendError>;
}

/// Remote service that prepares media on request and hands out a link once ready.
#[async_trait]
pub trait MediaApi: Send + Sync {
    async fn job_status(
        &self,
        job: &AcquisitionJob,
        cancel: &CancellationToken,
    ) -> Result<PollState, BackendError>;

    async fn fetch(
        &self,
        link: &str,
        destination: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), BackendError>;
}

/// Local extraction tool. Returns the path the tool reported, unverified.
#[async_trait]
pub trait MediaExtractor: Send + Sync {
    async fn extract(
        &self,
        job: &AcquisitionJob,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, BackendError>;
}
