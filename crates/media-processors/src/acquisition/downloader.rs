use crate::acquisition::cache;
use crate::acquisition::{KeyedLocks, RemoteAcquirer};
use crate::errors::EngineError;
use crate::traits::MediaExtractor;
use crate::types::{AcquisitionJob, MediaMode, TrackInfo};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, PartialEq)]
pub enum AcquisitionStep {
    Requested,
    CacheLookup,
    RemoteBackend,
    LocalBackend,
}

/// Turns a resolved track into a local file: cache first, then the remote
/// API when configured, then the local extractor.
pub struct Downloader {
    downloads_dir: PathBuf,
    remote: Option<RemoteAcquirer>,
    extractor: Arc<dyn MediaExtractor>,
    locks: KeyedLocks,
}

impl Downloader {
    pub fn new(
        downloads_dir: PathBuf,
        remote: Option<RemoteAcquirer>,
        extractor: Arc<dyn MediaExtractor>,
    ) -> Self {
        Self {
            downloads_dir,
            remote,
            extractor,
            locks: KeyedLocks::new(),
        }
    }

    pub async fn download(
        &self,
        track: &TrackInfo,
        mode: MediaMode,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, EngineError> {
        let job = AcquisitionJob::new(track.media_id.clone(), mode);
        let mut step = AcquisitionStep::Requested;

        let _guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(EngineError::Cancelled),
            guard = self.locks.lock(&job.media_id) => guard,
        };

        loop {
            debug!(media_id = %job.media_id, ?step, "Running next acquisition step");

            step = match step {
                AcquisitionStep::Requested => AcquisitionStep::CacheLookup,
                AcquisitionStep::CacheLookup => {
                    if let Some(path) = cache::lookup(&self.downloads_dir, &job.media_id, mode).await {
                        info!(media_id = %job.media_id, ?path, "Cache hit");
                        return Ok(path);
                    }
                    AcquisitionStep::RemoteBackend
                }
                AcquisitionStep::RemoteBackend => {
                    if let Some(path) = self.try_remote(&job, cancel).await? {
                        return Ok(path);
                    }
                    AcquisitionStep::LocalBackend
                }
                AcquisitionStep::LocalBackend => return self.run_local(&job, cancel).await,
            };
        }
    }

    /// `Ok(None)` means the remote backend is out and the local one should run.
    async fn try_remote(
        &self,
        job: &AcquisitionJob,
        cancel: &CancellationToken,
    ) -> Result<Option<PathBuf>, EngineError> {
        let remote = match &self.remote {
            Some(remote) => remote,
            None => {
                debug!(media_id = %job.media_id, "Remote API is not configured");
                return Ok(None);
            }
        };

        match remote.acquire(job, cancel).await {
            Ok(path) => Ok(Some(path)),
            Err(error) if error.is_cancelled() => Err(EngineError::Cancelled),
            Err(error) => {
                warn!(media_id = %job.media_id, %error, "Remote acquisition failed, falling back to yt-dlp");
                Ok(None)
            }
        }
    }

    async fn run_local(
        &self,
        job: &AcquisitionJob,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, EngineError> {
        let path = self.extractor.extract(job, cancel).await?;

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            warn!(media_id = %job.media_id, ?path, "Extractor reported a file that does not exist");
            return Err(EngineError::IntegrityFailed(path));
        }

        info!(media_id = %job.media_id, ?path, "Media downloaded with the local extractor");

        Ok(path)
    }
}
