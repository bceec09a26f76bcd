use async_trait::async_trait;
use media_processors::{
    AcquisitionJob, BackendError, CancellationToken, MediaApi, PollState, SearchBackend,
    SearchQuery, SearchResult,
};
use media_providers::api::{ApiTrack, JobKind, JobResponse};
use media_providers::{ApiClient, ApiClientError};
use std::future::Future;
use std::path::Path;
use tracing::debug;

/// Remote media API seen as both a search backend and an acquisition backend.
pub(crate) struct RemoteApi {
    client: ApiClient,
}

impl RemoteApi {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn map_error(error: ApiClientError) -> BackendError {
    match error {
        ApiClientError::Reqwest(error) if error.is_timeout() => {
            BackendError::Timeout(error.to_string())
        }
        ApiClientError::Cancelled => BackendError::Cancelled,
        ApiClientError::Io(error) => BackendError::Io(error),
        error => BackendError::Unavailable(Box::new(error)),
    }
}

async fn cancellable<T>(
    cancel: &CancellationToken,
    future: impl Future<Output = Result<T, ApiClientError>>,
) -> Result<T, BackendError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(BackendError::Cancelled),
        result = future => result.map_err(map_error),
    }
}

fn to_search_result(track: ApiTrack) -> SearchResult {
    SearchResult {
        duration: track.duration_secs(),
        id: track.id,
        name: track.name,
        url: track.url,
        cover: track.cover,
        platform: track.platform,
    }
}

pub(crate) fn poll_state(response: JobResponse) -> PollState {
    let status = response.status.trim().to_lowercase();

    match status.as_str() {
        "done" => PollState::Done {
            link: response.link,
            format: response.format,
        },
        "downloading" => PollState::Downloading,
        _ => PollState::Failed(
            [response.error, response.message]
                .into_iter()
                .flatten()
                .find(|message| !message.trim().is_empty())
                .unwrap_or_else(|| format!("unexpected status \"{}\"", status)),
        ),
    }
}

#[async_trait]
impl SearchBackend for RemoteApi {
    fn name(&self) -> &'static str {
        "remote-api"
    }

    async fn search(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, BackendError> {
        let tracks = cancellable(cancel, self.client.search(query.as_str())).await?;

        Ok(tracks.into_iter().map(to_search_result).collect())
    }
}

#[async_trait]
impl MediaApi for RemoteApi {
    async fn job_status(
        &self,
        job: &AcquisitionJob,
        cancel: &CancellationToken,
    ) -> Result<PollState, BackendError> {
        let kind = if job.mode.is_video() {
            JobKind::Video
        } else {
            JobKind::Song
        };

        let response =
            cancellable(cancel, self.client.job_status(kind, job.media_id.as_str())).await?;

        debug!(media_id = %job.media_id, status = %response.status, "Remote API job response");

        Ok(poll_state(response))
    }

    async fn fetch(
        &self,
        link: &str,
        destination: &Path,
        cancel: &CancellationToken,
    ) -> Result<(), BackendError> {
        self.client
            .download_file(link, destination, cancel)
            .await
            .map_err(map_error)
    }
}
