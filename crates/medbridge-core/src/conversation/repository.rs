//! ConversationRepository trait definition.
//!
//! Persistence operations for the conversation and its messages. The
//! get-or-create is the concurrency-sensitive one: two first-requests
//! racing on an empty database must resolve to the same conversation row.

use medbridge_types::conversation::{Conversation, Message};
use medbridge_types::error::RepositoryError;

/// Repository trait for conversation and message persistence.
///
/// Implementations live in medbridge-infra (`SqliteConversationRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ConversationRepository: Send + Sync {
    /// Fetch the conversation for `key`, creating it atomically if absent.
    ///
    /// Must be safe under concurrent first-requests: the unique key
    /// guarantees a single row per key regardless of interleaving.
    fn get_or_create(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Persist a new message. Messages are immutable once written.
    fn save_message(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All messages of a conversation, ordered by created_at ASC.
    fn list_messages(
        &self,
        conversation_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Case-insensitive substring search over original and translated
    /// text, in creation order. `%` and `_` in the query match literally.
    fn search_messages(
        &self,
        conversation_id: i64,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Number of messages owned by a conversation.
    fn count_messages(
        &self,
        conversation_id: i64,
    ) -> impl std::future::Future<Output = Result<u32, RepositoryError>> + Send;

    /// Delete a conversation; owned messages go with it (cascade).
    fn delete_conversation(
        &self,
        conversation_id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
