use crate::acquisition::cache::media_path;
use crate::traits::{BackendError, MediaApi};
use crate::types::{AcquisitionJob, MediaMode, PollState};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Clone, Debug)]
pub struct PollSettings {
    pub max_attempts: usize,
    pub audio_interval: Duration,
    pub video_interval: Duration,
}

impl PollSettings {
    pub fn interval(&self, mode: MediaMode) -> Duration {
        match mode {
            MediaMode::Audio => self.audio_interval,
            MediaMode::Video => self.video_interval,
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            audio_interval: Duration::from_secs(4),
            video_interval: Duration::from_secs(8),
        }
    }
}

/// Asks the remote API to prepare the media, polls until it reports a link,
/// then streams the file into the downloads directory.
#[derive(Clone)]
pub struct RemoteAcquirer {
    api: Arc<dyn MediaApi>,
    settings: PollSettings,
    downloads_dir: PathBuf,
}

impl RemoteAcquirer {
    pub fn new(api: Arc<dyn MediaApi>, settings: PollSettings, downloads_dir: PathBuf) -> Self {
        Self {
            api,
            settings,
            downloads_dir,
        }
    }

    pub async fn acquire(
        &self,
        job: &AcquisitionJob,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, BackendError> {
        let (link, format) = self.wait_until_ready(job, cancel).await?;
        let format = sanitize_format(format.as_deref(), job.mode);
        let destination = media_path(&self.downloads_dir, &job.media_id, &format);

        debug!(media_id = %job.media_id, ?destination, "Fetching prepared media");

        self.api.fetch(&link, &destination, cancel).await?;

        info!(media_id = %job.media_id, ?destination, "Media downloaded from the remote API");

        Ok(destination)
    }

    async fn wait_until_ready(
        &self,
        job: &AcquisitionJob,
        cancel: &CancellationToken,
    ) -> Result<(String, Option<String>), BackendError> {
        let interval = self.settings.interval(job.mode);

        for attempt in 1..=self.settings.max_attempts {
            let state = self.api.job_status(job, cancel).await?;

            debug!(media_id = %job.media_id, attempt, ?state, "Remote job status");

            match state {
                PollState::Done { link, .. } if link.trim().is_empty() => {
                    return Err(BackendError::Rejected(
                        "API response did not provide a download URL".into(),
                    ));
                }
                PollState::Done { link, format } => return Ok((link, format)),
                PollState::Failed(message) => {
                    warn!(media_id = %job.media_id, %message, "Remote job failed");
                    return Err(BackendError::Rejected(message));
                }
                PollState::Downloading if attempt < self.settings.max_attempts => {
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(BackendError::Cancelled),
                        _ = tokio::time::sleep(interval) => (),
                    }
                }
                PollState::Downloading => (),
            }
        }

        Err(BackendError::Timeout(
            "processing did not complete in time".into(),
        ))
    }
}

/// Formats end up in a file name, so only plain extensions are accepted.
fn sanitize_format(format: Option<&str>, mode: MediaMode) -> String {
    format
        .map(|format| format.trim().to_lowercase())
        .filter(|format| !format.is_empty() && format.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| mode.default_format().to_string())
}
