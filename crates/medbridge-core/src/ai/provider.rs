//! AiProvider trait definition.
//!
//! This is the capability interface every AI backend implements: translate
//! one text into a target language, or summarize a whole conversation into
//! a structured medical note.

use medbridge_types::ai::{AiError, ConversationTurn};

/// Trait for AI translation/summarization backends (Gemini, OpenAI).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in medbridge-infra; dynamic dispatch goes through
/// [`super::box_provider::BoxAiProvider`].
///
/// Callers are expected to have filtered empty input already (the
/// `TranslationService` short-circuits before reaching a provider), so
/// implementations may assume `text` and `turns` are non-empty.
pub trait AiProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Translate `text` into `target_language`, returning only the
    /// translation with medical terminology preserved.
    fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> impl std::future::Future<Output = Result<String, AiError>> + Send;

    /// Summarize conversation turns into the five-section medical note
    /// (Chief Complaint, Symptoms, Assessment, Treatment Plan, Follow-up).
    fn summarize(
        &self,
        turns: &[ConversationTurn],
    ) -> impl std::future::Future<Output = Result<String, AiError>> + Send;
}
