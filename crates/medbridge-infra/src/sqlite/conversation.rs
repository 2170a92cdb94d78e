//! SQLite conversation repository implementation.
//!
//! Implements `ConversationRepository` from `medbridge-core` using sqlx
//! with the split read/write pools: raw queries, private row structs,
//! RFC 3339 text timestamps.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

use medbridge_core::conversation::repository::ConversationRepository;
use medbridge_types::conversation::{Conversation, Message, Sender};
use medbridge_types::error::RepositoryError;

use super::pool::Database;

/// SQLite-backed implementation of `ConversationRepository`.
#[derive(Clone)]
pub struct SqliteConversationRepository {
    db: Database,
}

impl SqliteConversationRepository {
    /// Create a new repository backed by the given database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

// ---------------------------------------------------------------------------
// Private row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ConversationRow {
    id: i64,
    key: String,
    created_at: String,
}

impl ConversationRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            key: row.try_get("key")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_conversation(self) -> Result<Conversation, RepositoryError> {
        Ok(Conversation {
            id: self.id,
            key: self.key,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

struct MessageRow {
    id: String,
    conversation_id: i64,
    sender: String,
    text: Option<String>,
    translated_text: Option<String>,
    audio_path: Option<String>,
    created_at: String,
}

impl MessageRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            conversation_id: row.try_get("conversation_id")?,
            sender: row.try_get("sender")?,
            text: row.try_get("text")?,
            translated_text: row.try_get("translated_text")?,
            audio_path: row.try_get("audio_path")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<Message, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid message id: {e}")))?;
        let sender: Sender = self
            .sender
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Message {
            id,
            conversation_id: self.conversation_id,
            sender,
            text: self.text,
            translated_text: self.translated_text,
            audio_path: self.audio_path,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid timestamp '{s}': {e}")))
}

/// Escape `\`, `%` and `_` so a LIKE pattern matches them literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

const MESSAGE_COLUMNS: &str =
    "id, conversation_id, sender, text, translated_text, audio_path, created_at";

impl ConversationRepository for SqliteConversationRepository {
    async fn get_or_create(&self, key: &str) -> Result<Conversation, RepositoryError> {
        // The UNIQUE key makes this race-safe: whichever request inserts
        // first wins, the loser's insert is a no-op, and both read back
        // the same row.
        sqlx::query("INSERT INTO conversations (key, created_at) VALUES (?, ?) ON CONFLICT(key) DO NOTHING")
            .bind(key)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.db.write)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let row = sqlx::query("SELECT id, key, created_at FROM conversations WHERE key = ?")
            .bind(key)
            .fetch_one(&self.db.read)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        ConversationRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_conversation()
    }

    async fn save_message(&self, message: &Message) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO messages (id, conversation_id, sender, text, translated_text, audio_path, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(message.id.to_string())
        .bind(message.conversation_id)
        .bind(message.sender.to_string())
        .bind(&message.text)
        .bind(&message.translated_text)
        .bind(&message.audio_path)
        .bind(message.created_at.to_rfc3339())
        .execute(&self.db.write)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE conversation_id = ? ORDER BY created_at ASC, id ASC"
        ))
        .bind(conversation_id)
        .fetch_all(&self.db.read)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                MessageRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_message()
            })
            .collect()
    }

    async fn search_messages(
        &self,
        conversation_id: i64,
        query: &str,
    ) -> Result<Vec<Message>, RepositoryError> {
        let pattern = format!("%{}%", escape_like(query));

        let rows = sqlx::query(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages
             WHERE conversation_id = ?
               AND (text LIKE ? ESCAPE '\\' OR translated_text LIKE ? ESCAPE '\\')
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(conversation_id)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.db.read)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                MessageRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_message()
            })
            .collect()
    }

    async fn count_messages(&self, conversation_id: i64) -> Result<u32, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE conversation_id = ?")
                .bind(conversation_id)
                .fetch_one(&self.db.read)
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(count as u32)
    }

    async fn delete_conversation(&self, conversation_id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = ?")
            .bind(conversation_id)
            .execute(&self.db.write)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound {
                entity: "conversation",
            });
        }

        Ok(())
    }
}
