use async_trait::async_trait;
use media_processors::{
    AcquisitionJob, BackendError, CancellationToken, MediaExtractor, SearchBackend, SearchQuery,
    SearchResult, DEFAULT_PLATFORM, SEARCH_RESULTS_LIMIT,
};
use media_providers::ytdlp::{DownloadKind, VideoInfo};
use media_providers::{YtDlpClient, YtDlpError};
use std::path::PathBuf;

/// yt-dlp as the always-available search and acquisition backend.
pub(crate) struct LocalExtractor {
    client: YtDlpClient,
}

impl LocalExtractor {
    pub(crate) fn new(client: YtDlpClient) -> Self {
        Self { client }
    }
}

fn map_error(error: YtDlpError) -> BackendError {
    match error {
        YtDlpError::Timeout(timeout) => {
            BackendError::Timeout(format!("yt-dlp did not finish within {:?}", timeout))
        }
        YtDlpError::Cancelled => BackendError::Cancelled,
        YtDlpError::Io(error) => BackendError::Io(error),
        error @ YtDlpError::Spawn(_) => BackendError::Unavailable(Box::new(error)),
        error => BackendError::ExtractionFailed(error.to_string()),
    }
}

fn to_search_result(video: VideoInfo) -> SearchResult {
    SearchResult {
        id: video.id,
        name: video.title,
        url: video.url,
        cover: video.thumbnail,
        duration: video.duration,
        platform: DEFAULT_PLATFORM.into(),
    }
}

#[async_trait]
impl SearchBackend for LocalExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn search(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, BackendError> {
        let videos = match query {
            SearchQuery::Link(link) => self.client.lookup_url(&link.canonical_url, cancel).await,
            SearchQuery::Text(text) => {
                self.client
                    .search_text(text, SEARCH_RESULTS_LIMIT, cancel)
                    .await
            }
        }
        .map_err(map_error)?;

        Ok(videos.into_iter().map(to_search_result).collect())
    }
}

#[async_trait]
impl MediaExtractor for LocalExtractor {
    async fn extract(
        &self,
        job: &AcquisitionJob,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, BackendError> {
        let kind = if job.mode.is_video() {
            DownloadKind::Video
        } else {
            DownloadKind::Audio
        };

        self.client
            .download(job.media_id.as_str(), kind, cancel)
            .await
            .map_err(map_error)
    }
}
