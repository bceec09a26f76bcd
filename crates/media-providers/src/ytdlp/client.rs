use crate::ytdlp::args::{download_args, search_args, DownloadKind};
use crate::ytdlp::parser::{parse_search_output, reported_path, truncate_chars, VideoInfo};
use crate::ytdlp::process::run;
use crate::ytdlp::Evasion;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(20);
const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);
const STDERR_LIMIT: usize = 300;

#[derive(Debug, thiserror::Error)]
pub enum YtDlpError {
    #[error("Unable to start yt-dlp: {0}")]
    Spawn(std::io::Error),
    #[error("yt-dlp did not finish within {0:?}")]
    Timeout(Duration),
    #[error("yt-dlp has been cancelled")]
    Cancelled,
    #[error("yt-dlp exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("yt-dlp did not report the downloaded file path")]
    NoOutputPath,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct YtDlpClient {
    program: PathBuf,
    downloads_dir: PathBuf,
    cookies: Vec<PathBuf>,
    proxy: Option<String>,
    search_timeout: Duration,
    download_timeout: Duration,
}

impl YtDlpClient {
    pub fn create(program: PathBuf, downloads_dir: PathBuf) -> Self {
        Self {
            program,
            downloads_dir,
            cookies: vec![],
            proxy: None,
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            download_timeout: DEFAULT_DOWNLOAD_TIMEOUT,
        }
    }

    pub fn with_cookies(mut self, cookies: Vec<PathBuf>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_timeouts(mut self, search: Duration, download: Duration) -> Self {
        self.search_timeout = search;
        self.download_timeout = download;
        self
    }

    fn evasion(&self) -> Option<Evasion> {
        Evasion::choose(&self.cookies, self.proxy.as_deref())
    }

    pub async fn search_text(
        &self,
        query: &str,
        limit: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<VideoInfo>, YtDlpError> {
        self.search(&format!("ytsearch{}:{}", limit, query), cancel)
            .await
    }

    pub async fn lookup_url(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<VideoInfo>, YtDlpError> {
        self.search(url, cancel).await
    }

    async fn search(
        &self,
        target: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<VideoInfo>, YtDlpError> {
        let evasion = self.evasion();

        debug!(target, ?evasion, "Searching with yt-dlp");

        let output = run(
            &self.program,
            &search_args(target, evasion.as_ref()),
            self.search_timeout,
            cancel,
        )
        .await?;

        let videos = parse_search_output(&output.stdout);

        if !videos.is_empty() {
            if !output.status.success() {
                warn!(target, status = %output.status, "yt-dlp failed but returned results");
            }
            return Ok(videos);
        }

        if !output.status.success() {
            return Err(YtDlpError::Failed {
                status: output.status,
                stderr: truncate_chars(&output.stderr, STDERR_LIMIT),
            });
        }

        Ok(videos)
    }

    pub async fn download(
        &self,
        media_id: &str,
        kind: DownloadKind,
        cancel: &CancellationToken,
    ) -> Result<PathBuf, YtDlpError> {
        tokio::fs::create_dir_all(&self.downloads_dir).await?;

        let evasion = self.evasion();

        info!(media_id, ?kind, ?evasion, "Downloading with yt-dlp");

        let output = run(
            &self.program,
            &download_args(media_id, kind, &self.downloads_dir, evasion.as_ref()),
            self.download_timeout,
            cancel,
        )
        .await?;

        if !output.status.success() {
            return Err(YtDlpError::Failed {
                status: output.status,
                stderr: truncate_chars(&output.stderr, STDERR_LIMIT),
            });
        }

        reported_path(&output.stdout).ok_or(YtDlpError::NoOutputPath)
    }
}
