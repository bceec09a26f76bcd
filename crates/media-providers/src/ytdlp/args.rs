use crate::ytdlp::Evasion;
use std::path::Path;

pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

const AUDIO_SELECTOR: &str = "bestaudio[ext=m4a]/bestaudio[ext=mp4]/bestaudio[ext=webm]/bestaudio/best";
const VIDEO_SELECTOR: &str =
    "bestvideo[ext=mp4][height<=1080]+bestaudio[ext=m4a]/best[ext=mp4][height<=1080]";

const COMMON_DOWNLOAD_ARGS: [&str; 22] = [
    "--no-warnings",
    "--quiet",
    "--geo-bypass",
    "--retries",
    "2",
    "--continue",
    "--no-part",
    "--concurrent-fragments",
    "3",
    "--socket-timeout",
    "10",
    "--throttled-rate",
    "100K",
    "--retry-sleep",
    "1",
    "--no-write-thumbnail",
    "--no-write-info-json",
    "--no-embed-metadata",
    "--no-embed-chapters",
    "--no-embed-subs",
    "--extractor-args",
    "youtube:player_js_version=actual",
];

const PRINT_FILEPATH_ARGS: [&str; 2] = ["--print", "after_move:filepath"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DownloadKind {
    Audio,
    Video,
}

impl DownloadKind {
    fn selector(&self) -> &'static str {
        match self {
            DownloadKind::Audio => AUDIO_SELECTOR,
            DownloadKind::Video => VIDEO_SELECTOR,
        }
    }
}

pub fn watch_url(media_id: &str) -> String {
    format!("{}{}", WATCH_URL_PREFIX, media_id)
}

/// Command line for fetching one media file into `downloads_dir`. yt-dlp
/// prints the final path as the last stdout line.
pub fn download_args(
    media_id: &str,
    kind: DownloadKind,
    downloads_dir: &Path,
    evasion: Option<&Evasion>,
) -> Vec<String> {
    let mut args: Vec<String> = COMMON_DOWNLOAD_ARGS
        .iter()
        .map(|arg| arg.to_string())
        .collect();

    args.push("-o".into());
    args.push(
        downloads_dir
            .join("%(id)s.%(ext)s")
            .to_string_lossy()
            .to_string(),
    );

    if kind == DownloadKind::Video {
        args.push("--merge-output-format".into());
        args.push("mp4".into());
    }

    args.push("-f".into());
    args.push(kind.selector().into());

    if let Some(evasion) = evasion {
        args.extend(evasion.to_args());
    }

    args.push(watch_url(media_id));
    args.extend(PRINT_FILEPATH_ARGS.iter().map(|arg| arg.to_string()));

    args
}

/// Metadata-only invocation: one JSON object per result on stdout.
pub fn search_args(target: &str, evasion: Option<&Evasion>) -> Vec<String> {
    let mut args: Vec<String> = vec!["-j".into(), "--no-warnings".into(), "--no-playlist".into()];

    if let Some(evasion) = evasion {
        args.extend(evasion.to_args());
    }

    args.push(target.into());

    args
}
