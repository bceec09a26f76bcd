use media_processors::PollSettings;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

fn default_downloads_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_ytdlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_search_timeout() -> u64 {
    20u64
}

fn default_download_timeout() -> u64 {
    600u64
}

fn default_http_timeout() -> u64 {
    30u64
}

fn default_poll_max_attempts() -> usize {
    10usize
}

fn default_poll_audio_interval() -> u64 {
    4u64
}

fn default_poll_video_interval() -> u64 {
    8u64
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_bind_address")]
    pub(crate) bind_address: String,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
    pub(crate) api_url: Option<String>,
    pub(crate) api_key: Option<String>,
    #[serde(default)]
    pub(crate) cookies_path: Vec<String>,
    pub(crate) proxy: Option<String>,
    #[serde(default = "default_downloads_dir")]
    pub(crate) downloads_dir: PathBuf,
    #[serde(default = "default_ytdlp_path")]
    pub(crate) ytdlp_path: PathBuf,
    #[serde(default = "default_search_timeout")]
    pub(crate) search_timeout: u64,
    #[serde(default = "default_download_timeout")]
    pub(crate) download_timeout: u64,
    #[serde(default = "default_http_timeout")]
    pub(crate) http_timeout: u64,
    #[serde(default = "default_poll_max_attempts")]
    pub(crate) poll_max_attempts: usize,
    #[serde(default = "default_poll_audio_interval")]
    pub(crate) poll_audio_interval: u64,
    #[serde(default = "default_poll_video_interval")]
    pub(crate) poll_video_interval: u64,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Missing environment variable: {:#?}", error),
        }
    }

    /// Both the base URL and the key are needed to talk to the remote API.
    pub(crate) fn api_credentials(&self) -> Option<(&str, &str)> {
        let url = self.api_url.as_deref().map(str::trim).filter(|url| !url.is_empty())?;
        let key = self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())?;

        Some((url, key))
    }

    pub(crate) fn cookie_files(&self) -> Vec<PathBuf> {
        self.cookies_path
            .iter()
            .map(|path| path.trim())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    pub(crate) fn poll_settings(&self) -> PollSettings {
        PollSettings {
            max_attempts: self.poll_max_attempts,
            audio_interval: Duration::from_secs(self.poll_audio_interval),
            video_interval: Duration::from_secs(self.poll_video_interval),
        }
    }
}
