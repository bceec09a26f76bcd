use crate::link::{Link, WATCH_URL_PREFIX};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

pub const SEARCH_RESULTS_LIMIT: usize = 5;
pub const DEFAULT_PLATFORM: &str = "youtube";

// MediaId
#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub struct MediaId(pub(crate) String);

impl MediaId {
    pub const LENGTH: usize = 11;

    /// Accepts only well-formed platform identifiers.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = raw.len() == Self::LENGTH
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        valid.then(|| MediaId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL_PREFIX, self.0)
    }
}

impl Deref for MediaId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaMode {
    Audio,
    Video,
}

impl MediaMode {
    /// Container extensions a previous download of this mode may have produced.
    pub fn cache_extensions(&self) -> &'static [&'static str] {
        match self {
            MediaMode::Audio => &["mp3", "m4a", "webm"],
            MediaMode::Video => &["mp4", "webm", "mkv"],
        }
    }

    pub fn default_format(&self) -> &'static str {
        match self {
            MediaMode::Audio => "mp3",
            MediaMode::Video => "mp4",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaMode::Video)
    }
}

impl std::fmt::Display for MediaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaMode::Audio => write!(f, "audio"),
            MediaMode::Video => write!(f, "video"),
        }
    }
}

/// What a search backend is asked to look up.
#[derive(Clone, PartialEq, Debug)]
pub enum SearchQuery {
    Link(Link),
    Text(String),
}

impl SearchQuery {
    pub fn as_str(&self) -> &str {
        match self {
            SearchQuery::Link(link) => &link.canonical_url,
            SearchQuery::Text(text) => text,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub url: String,
    pub cover: String,
    pub duration: u64,
    pub platform: String,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TrackInfo {
    pub url: String,
    pub cdn_url: Option<String>,
    pub key: Option<String>,
    pub name: String,
    pub duration: u64,
    pub media_id: MediaId,
    pub cover: String,
    pub platform: String,
}

impl TrackInfo {
    pub(crate) fn from_search_result(media_id: MediaId, result: SearchResult) -> Self {
        let platform = if result.platform.is_empty() {
            DEFAULT_PLATFORM.to_string()
        } else {
            result.platform
        };

        let url = if result.url.trim().is_empty() {
            media_id.watch_url()
        } else {
            result.url
        };

        Self {
            url,
            cdn_url: None,
            key: None,
            name: result.name,
            duration: result.duration,
            media_id,
            cover: result.cover,
            platform,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct AcquisitionJob {
    pub media_id: MediaId,
    pub mode: MediaMode,
}

impl AcquisitionJob {
    pub fn new(media_id: MediaId, mode: MediaMode) -> Self {
        Self { media_id, mode }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum PollState {
    Downloading,
    Done {
        link: String,
        format: Option<String>,
    },
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str, platform: &str) -> SearchResult {
        SearchResult {
            id: "dQw4w9WgXcQ".into(),
            name: "Never Gonna Give You Up".into(),
            url: url.into(),
            cover: String::new(),
            duration: 212,
            platform: platform.into(),
        }
    }

    #[test]
    fn test_track_info_falls_back_to_watch_url_and_platform() {
        let media_id = MediaId::parse("dQw4w9WgXcQ").unwrap();
        let track = TrackInfo::from_search_result(media_id, result("", ""));

        assert_eq!(track.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(track.platform, DEFAULT_PLATFORM);
    }

    #[test]
    fn test_track_info_keeps_reported_url() {
        let media_id = MediaId::parse("dQw4w9WgXcQ").unwrap();
        let track = TrackInfo::from_search_result(
            media_id,
            result("https://music.youtube.com/watch?v=dQw4w9WgXcQ", "ytmusic"),
        );

        assert_eq!(track.url, "https://music.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(track.platform, "ytmusic");
    }
}
