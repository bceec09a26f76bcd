//! Recognition of platform links.
//!
//! Three link shapes point at the same media: the watch link, the short
//! `youtu.be` link and the `shorts` link. All of them are rewritten into the
//! watch form before the identifier is extracted, so the identifier is only
//! ever taken from a canonical URL.

use crate::types::MediaId;
use lazy_static::lazy_static;
use regex::Regex;

pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

const SHORT_LINK_MARKER: &str = "youtu.be/";
const SHORTS_LINK_MARKER: &str = "youtube.com/shorts/";

const LINK_PREFIXES: [&str; 5] = ["www.", "youtube.", "youtu.be", "m.youtube.", "music.youtube."];

lazy_static! {
    static ref LINK_PATTERNS: [Regex; 3] = [
        Regex::new(
            r"^(?:https?://)?(?:www\.|m\.|music\.)?youtube\.com/watch\?v=([\w-]{11})(?:[&#?].*)?$"
        )
        .expect("watch pattern is valid"),
        Regex::new(r"^(?:https?://)?(?:www\.)?youtu\.be/([\w-]{11})(?:[?#].*)?$")
            .expect("short link pattern is valid"),
        Regex::new(r"^(?:https?://)?(?:www\.)?youtube\.com/shorts/([\w-]{11})(?:[?#].*)?$")
            .expect("shorts pattern is valid"),
    ];
}

/// A recognized platform link in canonical form.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Link {
    pub canonical_url: String,
    pub media_id: MediaId,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LinkError {
    #[error("the query is empty")]
    Empty,
    #[error("the link is not supported")]
    Unsupported,
    #[error("unable to extract the video ID")]
    MissingId,
}

impl Link {
    pub fn parse(query: &str) -> Option<Self> {
        Self::try_parse(query).ok()
    }

    /// Same as [`Link::parse`], reporting which step rejected the query.
    pub fn try_parse(query: &str) -> Result<Self, LinkError> {
        let query = clear_query(query);

        if query.is_empty() {
            return Err(LinkError::Empty);
        }

        if !is_valid_link(&query) {
            return Err(LinkError::Unsupported);
        }

        let canonical_url = normalize_url(&query);
        let media_id = extract_media_id(&canonical_url).ok_or(LinkError::MissingId)?;

        Ok(Self {
            canonical_url,
            media_id,
        })
    }
}

fn looks_like_link(query: &str) -> bool {
    let lower = query.to_lowercase();

    lower.contains("://") || LINK_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

/// Trims the query and, for link-shaped input, drops the fragment and any
/// parameter tail following the first `&`.
pub fn clear_query(query: &str) -> String {
    let query = query.trim();

    if !looks_like_link(query) {
        return query.to_string();
    }

    let query = query.split('#').next().unwrap_or_default();
    let query = query.split('&').next().unwrap_or_default();

    query.trim().to_string()
}

fn id_after_marker<'a>(url: &'a str, marker: &str) -> Option<&'a str> {
    let (_, tail) = url.split_once(marker)?;
    let end = tail
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(tail.len());

    Some(&tail[..end]).filter(|id| !id.is_empty())
}

/// Rewrites every recognized link shape into the watch form. Idempotent.
pub fn normalize_url(url: &str) -> String {
    let media_id = id_after_marker(url, SHORT_LINK_MARKER)
        .or_else(|| id_after_marker(url, SHORTS_LINK_MARKER))
        .or_else(|| {
            LINK_PATTERNS[0]
                .captures(url)
                .and_then(|captures| captures.get(1))
                .map(|id| id.as_str())
        });

    match media_id {
        Some(id) => format!("{}{}", WATCH_URL_PREFIX, id),
        None => url.to_string(),
    }
}

pub fn extract_media_id(url: &str) -> Option<MediaId> {
    let url = normalize_url(url);

    LINK_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(&url))
        .and_then(|captures| captures.get(1))
        .and_then(|id| MediaId::parse(id.as_str()))
}

pub fn is_valid_link(query: &str) -> bool {
    let query = clear_query(query);

    !query.is_empty() && LINK_PATTERNS.iter().any(|pattern| pattern.is_match(&query))
}
