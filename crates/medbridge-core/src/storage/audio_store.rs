//! Audio store trait.
//!
//! Audio uploads are opaque blobs: stored verbatim, never transcribed,
//! addressed by a path derived from the owning message id. The store also
//! derives the public URL the response carries.

use medbridge_types::error::StorageError;
use uuid::Uuid;

/// A stored audio blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAudio {
    /// Store-relative path, persisted on the message row
    /// (e.g. `audio/0192e4a0-....webm`).
    pub path: String,
    /// Public retrieval URL (e.g. `/media/audio/0192e4a0-....webm`).
    pub url: String,
}

/// Trait for audio blob storage.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in medbridge-infra (`LocalAudioStore`).
pub trait AudioStore: Send + Sync {
    /// Store `data` verbatim for the message, deriving the stored name
    /// from `message_id` and the (sanitized) extension of
    /// `original_filename`.
    fn save(
        &self,
        message_id: &Uuid,
        original_filename: Option<&str>,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<StoredAudio, StorageError>> + Send;

    /// Public URL for a previously stored path.
    fn url_for(&self, path: &str) -> String;
}
