use crate::api::types::{ApiSearchResponse, ApiTrack, JobKind, JobResponse};
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("Unexpected response status: {0}")]
    UnexpectedStatus(StatusCode),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("The request has been cancelled")]
    Cancelled,
}

pub type ApiClientResult<T> = Result<T, ApiClientError>;

/// Client for the remote media API: search, job status and file transfer.
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn create(base_url: &str, api_key: &str, timeout: Duration) -> ApiClientResult<Self> {
        let client = Client::builder().connect_timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn search(&self, query: &str) -> ApiClientResult<Vec<ApiTrack>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("query", query), ("api", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ApiClientError::UnexpectedStatus(response.status()));
        }

        let ApiSearchResponse { results } = response.json().await?;

        debug!(query, results = results.len(), "Remote API search finished");

        Ok(results)
    }

    pub async fn job_status(&self, kind: JobKind, media_id: &str) -> ApiClientResult<JobResponse> {
        let response = self
            .client
            .get(format!("{}/{}/{}", self.base_url, kind.as_path(), media_id))
            .query(&[("api", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(ApiClientError::UnexpectedStatus(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Streams `link` into `destination`. The body goes to a `.part` file
    /// first, which is renamed on success and removed on any failure.
    pub async fn download_file(
        &self,
        link: &str,
        destination: &Path,
        cancel: &CancellationToken,
    ) -> ApiClientResult<()> {
        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let part_path = part_path(destination);

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiClientError::Cancelled),
            result = self.stream_to(link, &part_path) => result,
        };

        match result {
            Ok(()) => {
                tokio::fs::rename(&part_path, destination).await?;
                Ok(())
            }
            Err(error) => {
                if let Err(remove_error) = tokio::fs::remove_file(&part_path).await {
                    if remove_error.kind() != std::io::ErrorKind::NotFound {
                        warn!(?part_path, ?remove_error, "Unable to remove partial download");
                    }
                }
                Err(error)
            }
        }
    }

    async fn stream_to(&self, link: &str, path: &Path) -> ApiClientResult<()> {
        let mut response = self.client.get(link).send().await?;

        if response.status() != StatusCode::OK {
            return Err(ApiClientError::UnexpectedStatus(response.status()));
        }

        let mut file = tokio::fs::File::create(path).await?;
        let mut written = 0usize;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len();
        }

        file.flush().await?;

        debug!(link, written, "Remote file transferred");

        Ok(())
    }
}

fn part_path(destination: &Path) -> PathBuf {
    let mut path = destination.as_os_str().to_owned();
    path.push(".part");
    PathBuf::from(path)
}
