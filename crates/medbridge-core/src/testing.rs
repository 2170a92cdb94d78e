//! Shared test doubles for the AI provider abstraction.
//!
//! Used by unit tests here and by handler-level tests in the API crate, so
//! neither needs a network or an API key. Not compiled out of release
//! builds on purpose: downstream integration tests import these through
//! the public API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use medbridge_types::ai::{AiError, ConversationTurn};

use crate::ai::box_provider::BoxAiProvider;
use crate::ai::factory::ProviderFactory;
use crate::ai::provider::AiProvider;

/// An [`AiProvider`] with a canned outcome and a call counter.
///
/// Every translate/summarize call increments the counter, so tests can
/// assert the short-circuit paths never reach a provider.
pub struct MockProvider {
    reply: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// A provider that answers every call with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A provider that fails every call with `AiError::Provider`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the shared call counter.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    fn with_shared_counter(reply: Result<String, String>, calls: Arc<AtomicUsize>) -> Self {
        Self { reply, calls }
    }

    fn respond(&self) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(AiError::Provider {
                message: message.clone(),
            }),
        }
    }
}

impl AiProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn translate(&self, _text: &str, _target_language: &str) -> Result<String, AiError> {
        self.respond()
    }

    async fn summarize(&self, _turns: &[ConversationTurn]) -> Result<String, AiError> {
        self.respond()
    }
}

enum Canned {
    Reply(String),
    Fail(String),
    MissingKey(String),
}

/// A [`ProviderFactory`] that hands out [`MockProvider`]s.
///
/// All providers built by one factory share a single call counter, since
/// the translation service constructs a fresh provider per call.
pub struct FixedProviderFactory {
    canned: Canned,
    calls: Arc<AtomicUsize>,
}

impl FixedProviderFactory {
    /// Factory whose providers answer every call with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            canned: Canned::Reply(reply.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Factory whose providers fail every call with `AiError::Provider`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            canned: Canned::Fail(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Factory that fails construction itself with `AiError::MissingApiKey`,
    /// mimicking an unset credential.
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self {
            canned: Canned::MissingKey(key.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the counter shared by every provider this factory builds.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl ProviderFactory for FixedProviderFactory {
    fn build(&self) -> Result<BoxAiProvider, AiError> {
        match &self.canned {
            Canned::Reply(text) => Ok(BoxAiProvider::new(MockProvider::with_shared_counter(
                Ok(text.clone()),
                Arc::clone(&self.calls),
            ))),
            Canned::Fail(message) => Ok(BoxAiProvider::new(MockProvider::with_shared_counter(
                Err(message.clone()),
                Arc::clone(&self.calls),
            ))),
            Canned::MissingKey(key) => Err(AiError::MissingApiKey { key: key.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_counts_calls() {
        let provider = MockProvider::replying("ok");
        let calls = provider.call_counter();

        provider.translate("a", "Spanish").await.unwrap();
        provider
            .summarize(&[ConversationTurn {
                sender: "Doctor".to_string(),
                text: "hi".to_string(),
            }])
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_factory_shares_counter_across_builds() {
        let factory = FixedProviderFactory::replying("ok");
        let calls = factory.call_counter();

        let a = factory.build().unwrap();
        let b = factory.build().unwrap();
        assert_eq!(a.name(), "mock");
        assert_eq!(b.name(), "mock");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_key_factory_fails_build() {
        let factory = FixedProviderFactory::missing_key("OPENAI_API_KEY");
        let err = factory.build().unwrap_err();
        assert!(err.is_configuration());
    }
}
