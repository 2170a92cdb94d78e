//! ProviderFactory trait definition.
//!
//! The service constructs exactly one provider instance per
//! translate/summarize call, so selection stays a pure function of
//! configuration and a missing credential fails fast -- before any network
//! I/O. A retrying or pooling wrapper would slot in here.

use medbridge_types::ai::AiError;

use super::box_provider::BoxAiProvider;

/// Builds the configured AI provider on demand.
///
/// Object-safe by design (construction is synchronous): the translation
/// service holds a `Box<dyn ProviderFactory>` so tests can substitute
/// canned providers. The infra implementation resolves the provider kind
/// and API key from configuration/environment.
///
/// # Errors
///
/// `AiError::MissingApiKey` when the selected provider's credential is not
/// configured. This is the configuration tier of the error taxonomy and
/// must surface before any request is attempted.
pub trait ProviderFactory: Send + Sync {
    fn build(&self) -> Result<BoxAiProvider, AiError>;
}
