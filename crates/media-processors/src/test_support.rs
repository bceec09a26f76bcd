use crate::traits::{BackendError, MediaApi, MediaExtractor, SearchBackend};
use crate::types::{AcquisitionJob, PollState, SearchQuery, SearchResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

pub(crate) const MEDIA_ID: &str = "dQw4w9WgXcQ";

pub(crate) fn search_result(id: &str, name: &str) -> SearchResult {
    SearchResult {
        id: id.into(),
        name: name.into(),
        url: format!("https://www.youtube.com/watch?v={}", id),
        cover: format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
        duration: 212,
        platform: "youtube".into(),
    }
}

pub(crate) fn unavailable() -> BackendError {
    BackendError::Unavailable(Box::new(Error::from(ErrorKind::ConnectionRefused)))
}

pub(crate) enum SearchBehaviour {
    Results(Vec<SearchResult>),
    Fail,
    Cancelled,
}

pub(crate) struct SearchBackendMock {
    name: &'static str,
    behaviour: SearchBehaviour,
    calls: AtomicUsize,
    queries: Mutex<Vec<SearchQuery>>,
}

impl SearchBackendMock {
    pub(crate) fn new(name: &'static str, behaviour: SearchBehaviour) -> Self {
        Self {
            name,
            behaviour,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(vec![]),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for SearchBackendMock {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(
        &self,
        query: &SearchQuery,
        _cancel: &CancellationToken,
    ) -> Result<Vec<SearchResult>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        match &self.behaviour {
            SearchBehaviour::Results(results) => Ok(results.clone()),
            SearchBehaviour::Fail => Err(unavailable()),
            SearchBehaviour::Cancelled => Err(BackendError::Cancelled),
        }
    }
}

/// Replays a scripted sequence of poll responses and writes fetched files.
pub(crate) struct MediaApiMock {
    statuses: Mutex<VecDeque<Result<PollState, BackendError>>>,
    status_calls: AtomicUsize,
    fetched: Mutex<Vec<(String, PathBuf)>>,
}

impl MediaApiMock {
    pub(crate) fn new(statuses: Vec<Result<PollState, BackendError>>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            status_calls: AtomicUsize::new(0),
            fetched: Mutex::new(vec![]),
        }
    }

    pub(crate) fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fetched(&self) -> Vec<(String, PathBuf)> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaApi for MediaApiMock {
    async fn job_status(
        &self,
        _job: &AcquisitionJob,
        _cancel: &CancellationToken,
    ) -> Result<PollState, BackendError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);

        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(PollState::Downloading))
    }

    async fn fetch(
        &self,
        link: &str,
        destination: &Path,
        _cancel: &CancellationToken,
    ) -> Result<(), BackendError> {
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(destination, b"remote").await?;

        self.fetched
            .lock()
            .unwrap()
            .push((link.to_string(), destination.to_path_buf()));

        Ok(())
    }
}

pub(crate) enum ExtractBehaviour {
    /// Writes the file and reports its path.
    Write(PathBuf),
    /// Reports a path without creating anything.
    ReportOnly(PathBuf),
    Fail,
}

pub(crate) struct MediaExtractorMock {
    behaviour: ExtractBehaviour,
    calls: AtomicUsize,
}

impl MediaExtractorMock {
    pub(crate) fn new(behaviour: ExtractBehaviour) -> Self {
        Self {
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaExtractor for MediaExtractorMock {
    async fn extract(
        &self,
        _job: &AcquisitionJob,
        _cancel: &CancellationToken,
    ) -> Result<PathBuf, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behaviour {
            ExtractBehaviour::Write(path) => {
                tokio::fs::write(path, b"local").await?;
                Ok(path.clone())
            }
            ExtractBehaviour::ReportOnly(path) => Ok(path.clone()),
            ExtractBehaviour::Fail => Err(BackendError::ExtractionFailed(
                "yt-dlp exited with status 1".into(),
            )),
        }
    }
}
