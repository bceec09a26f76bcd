use crate::acquisition::Downloader;
use crate::errors::EngineError;
use crate::search::MetadataResolver;
use crate::types::{MediaMode, SearchResult, TrackInfo};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Single entry point for callers: search, resolve a link, fetch the media.
pub struct MediaEngine {
    metadata_resolver: MetadataResolver,
    downloader: Downloader,
}

impl MediaEngine {
    pub fn new(metadata_resolver: MetadataResolver, downloader: Downloader) -> Self {
        Self {
            metadata_resolver,
            downloader,
        }
    }

    pub async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, EngineError> {
        self.metadata_resolver.search(query, cancel).await
    }

    pub async fn resolve(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<TrackInfo, EngineError> {
        self.metadata_resolver.resolve(query, cancel).await
    }

    pub async fn download(
        &self,
        track: &TrackInfo,
        mode: MediaMode,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, EngineError> {
        self.downloader.download(track, mode, cancel).await
    }

    /// Resolves the link and downloads the track it points at.
    pub async fn fetch(
        &self,
        query: &str,
        mode: MediaMode,
        cancel: &CancellationToken,
    ) -> Result<(TrackInfo, PathBuf), EngineError> {
        let track = self.resolve(query, cancel).await?;
        let path = self.download(&track, mode, cancel).await?;

        info!(media_id = %track.media_id, %mode, ?path, "Track fetched");

        Ok((track, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchResolver;
    use crate::test_support::{
        search_result, ExtractBehaviour, MediaExtractorMock, SearchBackendMock, SearchBehaviour,
        MEDIA_ID,
    };
    use std::sync::Arc;

    #[actix_rt::test]
    async fn test_fetch_resolves_then_downloads() {
        let dir = tempfile::tempdir().unwrap();
        let local_file = dir.path().join(format!("{}.m4a", MEDIA_ID));
        let search = Arc::new(SearchBackendMock::new(
            "yt-dlp",
            SearchBehaviour::Results(vec![search_result(MEDIA_ID, "Song")]),
        ));
        let extractor = Arc::new(MediaExtractorMock::new(ExtractBehaviour::Write(
            local_file.clone(),
        )));
        let engine = MediaEngine::new(
            MetadataResolver::new(SearchResolver::new(None, search)),
            Downloader::new(dir.path().to_path_buf(), None, extractor.clone()),
        );

        let (track, path) = engine
            .fetch(
                &format!("https://youtu.be/{}", MEDIA_ID),
                MediaMode::Audio,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(track.media_id.as_str(), MEDIA_ID);
        assert_eq!(path, local_file);
        assert_eq!(extractor.calls(), 1);
    }
}
