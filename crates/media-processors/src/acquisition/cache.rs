//! The downloads directory doubles as the only cache: a file named
//! `{media-id}.{ext}` is trusted on presence alone.

use crate::types::{MediaId, MediaMode};
use std::path::{Path, PathBuf};

pub fn media_path(downloads_dir: &Path, media_id: &MediaId, format: &str) -> PathBuf {
    downloads_dir.join(format!("{}.{}", media_id, format))
}

pub async fn lookup(downloads_dir: &Path, media_id: &MediaId, mode: MediaMode) -> Option<PathBuf> {
    for extension in mode.cache_extensions() {
        let path = media_path(downloads_dir, media_id, extension);

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Some(path);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media_id() -> MediaId {
        MediaId::parse("dQw4w9WgXcQ").unwrap()
    }

    #[actix_rt::test]
    async fn test_lookup_finds_audio_in_any_audio_container() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dQw4w9WgXcQ.m4a"), b"audio").unwrap();

        assert_eq!(
            lookup(dir.path(), &media_id(), MediaMode::Audio).await,
            Some(dir.path().join("dQw4w9WgXcQ.m4a"))
        );
    }

    #[actix_rt::test]
    async fn test_lookup_ignores_containers_of_the_other_mode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dQw4w9WgXcQ.mp4"), b"video").unwrap();

        assert_eq!(lookup(dir.path(), &media_id(), MediaMode::Audio).await, None);
        assert_eq!(
            lookup(dir.path(), &media_id(), MediaMode::Video).await,
            Some(dir.path().join("dQw4w9WgXcQ.mp4"))
        );
    }

    #[actix_rt::test]
    async fn test_lookup_on_missing_directory_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(
            lookup(&dir.path().join("absent"), &media_id(), MediaMode::Video).await,
            None
        );
    }
}
