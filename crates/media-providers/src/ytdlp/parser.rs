use crate::ytdlp::args::watch_url;
use serde::Deserialize;
use std::path::PathBuf;

/// One search hit as reported by `yt-dlp -j`.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub duration: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawVideo {
    id: String,
    title: String,
    webpage_url: String,
    thumbnail: Option<String>,
    thumbnails: Vec<RawThumbnail>,
    duration: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawThumbnail {
    url: String,
}

impl From<RawVideo> for VideoInfo {
    fn from(raw: RawVideo) -> Self {
        let url = match raw.webpage_url.trim() {
            "" => watch_url(&raw.id),
            url => url.to_string(),
        };
        let thumbnail = raw
            .thumbnail
            .filter(|thumbnail| !thumbnail.trim().is_empty())
            .or_else(|| raw.thumbnails.into_iter().last().map(|thumb| thumb.url))
            .unwrap_or_default();
        let duration = raw
            .duration
            .filter(|duration| duration.is_finite() && *duration > 0.0)
            .map(|duration| duration.trunc() as u64)
            .unwrap_or_default();

        VideoInfo {
            id: raw.id,
            title: raw.title,
            url,
            thumbnail,
            duration,
        }
    }
}

/// yt-dlp mixes progress and warning lines into stdout, so anything that is
/// not a JSON object with an id is skipped.
pub fn parse_search_output(stdout: &str) -> Vec<VideoInfo> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .filter_map(|line| serde_json::from_str::<RawVideo>(line).ok())
        .filter(|raw| !raw.id.trim().is_empty())
        .map(VideoInfo::from)
        .collect()
}

/// Last non-empty stdout line, which `--print after_move:filepath` emits.
pub fn reported_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

pub(crate) fn truncate_chars(text: &str, limit: usize) -> String {
    text.trim().chars().take(limit).collect()
}
