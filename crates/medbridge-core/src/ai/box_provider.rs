//! BoxAiProvider -- object-safe dynamic dispatch wrapper for AiProvider.
//!
//! Three-step pattern:
//! 1. Define an object-safe `AiProviderDyn` trait with boxed futures
//! 2. Blanket-impl `AiProviderDyn` for all `T: AiProvider`
//! 3. `BoxAiProvider` wraps `Box<dyn AiProviderDyn>` and delegates

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use medbridge_types::ai::{AiError, ConversationTurn};

use super::provider::AiProvider;

/// Object-safe version of [`AiProvider`] with boxed futures.
///
/// This trait exists solely to enable dynamic dispatch (`dyn AiProviderDyn`).
/// A blanket implementation is provided for all types implementing
/// `AiProvider`.
pub trait AiProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn translate_boxed<'a>(
        &'a self,
        text: &'a str,
        target_language: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiError>> + Send + 'a>>;

    fn summarize_boxed<'a>(
        &'a self,
        turns: &'a [ConversationTurn],
    ) -> Pin<Box<dyn Future<Output = Result<String, AiError>> + Send + 'a>>;
}

/// Blanket implementation: any `AiProvider` automatically implements
/// `AiProviderDyn`.
impl<T: AiProvider> AiProviderDyn for T {
    fn name(&self) -> &str {
        AiProvider::name(self)
    }

    fn translate_boxed<'a>(
        &'a self,
        text: &'a str,
        target_language: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, AiError>> + Send + 'a>> {
        Box::pin(self.translate(text, target_language))
    }

    fn summarize_boxed<'a>(
        &'a self,
        turns: &'a [ConversationTurn],
    ) -> Pin<Box<dyn Future<Output = Result<String, AiError>> + Send + 'a>> {
        Box::pin(self.summarize(turns))
    }
}

/// Type-erased AI provider for runtime backend selection.
///
/// Since `AiProvider` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxAiProvider` provides equivalent methods that delegate to
/// the inner `AiProviderDyn` trait object, letting the factory pick Gemini
/// or OpenAI from configuration at call time.
pub struct BoxAiProvider {
    inner: Box<dyn AiProviderDyn + Send + Sync>,
}

impl fmt::Debug for BoxAiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxAiProvider")
            .field("name", &self.inner.name())
            .finish_non_exhaustive()
    }
}

impl BoxAiProvider {
    /// Wrap a concrete `AiProvider` in a type-erased box.
    pub fn new<T: AiProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Translate `text` into `target_language`.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String, AiError> {
        self.inner.translate_boxed(text, target_language).await
    }

    /// Summarize conversation turns into the structured medical note.
    pub async fn summarize(&self, turns: &[ConversationTurn]) -> Result<String, AiError> {
        self.inner.summarize_boxed(turns).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProvider;

    #[tokio::test]
    async fn test_box_provider_delegates_translate() {
        let boxed = BoxAiProvider::new(MockProvider::replying("hola"));
        assert_eq!(boxed.name(), "mock");

        let out = boxed.translate("hello", "Spanish").await.unwrap();
        assert_eq!(out, "hola");
    }

    #[tokio::test]
    async fn test_box_provider_delegates_summarize() {
        let boxed = BoxAiProvider::new(MockProvider::replying("Chief Complaint: fever"));
        let turns = vec![ConversationTurn {
            sender: "Patient".to_string(),
            text: "I have a fever".to_string(),
        }];

        let out = boxed.summarize(&turns).await.unwrap();
        assert_eq!(out, "Chief Complaint: fever");
    }

    #[tokio::test]
    async fn test_box_provider_propagates_errors() {
        let boxed = BoxAiProvider::new(MockProvider::failing("boom"));
        let err = boxed.translate("hello", "Spanish").await.unwrap_err();
        assert!(matches!(err, AiError::Provider { .. }));
    }
}
