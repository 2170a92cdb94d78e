//! Application state wiring all services together.
//!
//! AppState holds the concrete repository, AI service and audio store
//! used by the HTTP handlers. Handlers are written against the concrete
//! infra implementations; tests build the same struct from parts with a
//! canned provider factory instead.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use medbridge_core::ai::service::TranslationService;
use medbridge_infra::ai::EnvProviderFactory;
use medbridge_infra::sqlite::conversation::SqliteConversationRepository;
use medbridge_infra::sqlite::pool::Database;
use medbridge_infra::storage::filesystem::LocalAudioStore;
use medbridge_types::config::AppConfig;

/// Shared application state used by all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub conversation_repo: Arc<SqliteConversationRepository>,
    pub translation: Arc<TranslationService>,
    pub audio_store: Arc<LocalAudioStore>,
    /// Lookup key of the single lazily created conversation.
    pub conversation_key: String,
    /// Root of stored media, served under `/media`.
    pub media_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: open the database (running
    /// migrations), wire the provider factory and audio store.
    pub async fn init(data_dir: &Path, config: AppConfig) -> anyhow::Result<Self> {
        let db = Database::open(data_dir).await?;
        let media_dir = data_dir.join("media");

        let translation =
            TranslationService::new(Box::new(EnvProviderFactory::new(config.ai.clone())));

        Ok(Self {
            conversation_repo: Arc::new(SqliteConversationRepository::new(db)),
            translation: Arc::new(translation),
            audio_store: Arc::new(LocalAudioStore::new(media_dir.clone())),
            conversation_key: config.conversation_key,
            media_dir,
        })
    }
}
