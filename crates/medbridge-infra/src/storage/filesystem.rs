//! Local filesystem audio store implementation.
//!
//! Implements the `AudioStore` trait from `medbridge-core` with blobs
//! stored at `{media_dir}/audio/{message_id}.{ext}`. Stored paths are
//! relative to the media root so the HTTP layer can serve them directly
//! under `/media/`.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use medbridge_core::storage::audio_store::{AudioStore, StoredAudio};
use medbridge_types::error::StorageError;

/// Local filesystem-backed audio store.
///
/// The on-disk name is derived from the message id, never from the
/// uploaded filename; only the extension survives, sanitized.
pub struct LocalAudioStore {
    media_dir: PathBuf,
}

impl LocalAudioStore {
    /// Extensions longer than this are treated as junk.
    const MAX_EXTENSION_LEN: usize = 8;

    /// Fallback extension when the upload carries none we can use.
    /// Browser `MediaRecorder` captures default to WebM.
    const DEFAULT_EXTENSION: &'static str = "webm";

    /// Create a new audio store rooted at `media_dir`.
    pub fn new(media_dir: PathBuf) -> Self {
        Self { media_dir }
    }

    /// The media root this store writes under.
    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    fn audio_dir(&self) -> PathBuf {
        self.media_dir.join("audio")
    }

    /// Derive a safe lowercase extension from the uploaded filename.
    /// Non-alphanumeric or overlong extensions fall back to the default.
    fn sanitize_extension(original_filename: Option<&str>) -> String {
        original_filename
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| {
                !ext.is_empty()
                    && ext.len() <= Self::MAX_EXTENSION_LEN
                    && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| Self::DEFAULT_EXTENSION.to_string())
    }
}

impl AudioStore for LocalAudioStore {
    async fn save(
        &self,
        message_id: &Uuid,
        original_filename: Option<&str>,
        data: &[u8],
    ) -> Result<StoredAudio, StorageError> {
        // The uploaded name only contributes its extension, but hostile
        // names are rejected outright rather than laundered.
        if let Some(name) = original_filename {
            if name.contains("..") || name.contains('/') || name.contains('\\') {
                return Err(StorageError::InvalidFilename(name.to_string()));
            }
        }

        let extension = Self::sanitize_extension(original_filename);
        let filename = format!("{message_id}.{extension}");
        let relative = format!("audio/{filename}");

        let dir = self.audio_dir();
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&filename), data).await?;

        let url = self.url_for(&relative);
        Ok(StoredAudio {
            path: relative,
            url,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("/media/{path}")
    }
}
