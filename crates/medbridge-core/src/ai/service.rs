//! The translation service orchestrating provider construction and calls.
//!
//! `TranslationService` owns the two short-circuit rules that must hold
//! before any provider is even constructed: empty text translates to an
//! empty string, and an empty conversation summarizes to a fixed message.
//! Everything else is delegated to a provider built fresh for the call.

use medbridge_types::ai::{AiError, ConversationTurn};

use super::factory::ProviderFactory;

/// Returned by `summarize` for an empty conversation, without touching
/// the provider.
pub const EMPTY_CONVERSATION_SUMMARY: &str = "No conversation to summarize.";

/// Target language used when a request does not name one.
pub const DEFAULT_TARGET_LANGUAGE: &str = "English";

/// Provider-agnostic entry point for translate and summarize.
///
/// Holds a [`ProviderFactory`] behind dynamic dispatch; one provider
/// instance is built per call (configuration errors therefore surface on
/// every call until fixed, never cached).
pub struct TranslationService {
    factory: Box<dyn ProviderFactory>,
}

impl TranslationService {
    pub fn new(factory: Box<dyn ProviderFactory>) -> Self {
        Self { factory }
    }

    /// Translate `text` into `target_language`.
    ///
    /// Empty or whitespace-only input short-circuits to `""` -- the
    /// provider is neither constructed nor contacted.
    #[tracing::instrument(
        name = "translate",
        skip(self, text),
        fields(target_language = %target_language, chars = text.len())
    )]
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, AiError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let provider = self.factory.build()?;
        tracing::debug!(provider = provider.name(), "dispatching translate");
        provider.translate(text, target_language).await
    }

    /// Summarize conversation turns into the structured medical note.
    ///
    /// An empty conversation short-circuits to
    /// [`EMPTY_CONVERSATION_SUMMARY`] without constructing a provider.
    #[tracing::instrument(name = "summarize", skip(self, turns), fields(turn_count = turns.len()))]
    pub async fn summarize(&self, turns: &[ConversationTurn]) -> Result<String, AiError> {
        if turns.is_empty() {
            return Ok(EMPTY_CONVERSATION_SUMMARY.to_string());
        }

        let provider = self.factory.build()?;
        tracing::debug!(provider = provider.name(), "dispatching summarize");
        provider.summarize(turns).await
    }
}
