//! AI provider implementations.
//!
//! Contains concrete implementations of the [`AiProvider`] trait defined
//! in `medbridge-core`, plus a factory ([`create_provider`]) that selects
//! the configured provider and resolves its API key from the environment.

pub mod gemini;
pub mod openai;

use secrecy::SecretString;

use medbridge_core::ai::box_provider::BoxAiProvider;
use medbridge_core::ai::factory::ProviderFactory;
use medbridge_types::ai::{AiError, ProviderKind};
use medbridge_types::config::AiConfig;

use self::gemini::GeminiProvider;
use self::openai::OpenAiProvider;

/// Create a [`BoxAiProvider`] for the configured provider kind.
///
/// Resolves the API key from the provider's environment variable
/// (`OPENAI_API_KEY` or `GEMINI_API_KEY`) at call time, so a key added
/// after startup is picked up without a restart.
///
/// # Errors
///
/// Returns [`AiError::MissingApiKey`] when the variable is unset or blank.
pub fn create_provider(config: &AiConfig) -> Result<BoxAiProvider, AiError> {
    let key_var = config.provider.api_key_env();
    let api_key = std::env::var(key_var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AiError::MissingApiKey {
            key: key_var.to_string(),
        })?;
    let secret = SecretString::from(api_key);

    Ok(match config.provider {
        ProviderKind::OpenAi => BoxAiProvider::new(OpenAiProvider::new(secret, config)),
        ProviderKind::Gemini => BoxAiProvider::new(GeminiProvider::new(secret, config)),
    })
}

/// [`ProviderFactory`] that builds the configured provider fresh for each
/// translate/summarize call.
#[derive(Clone)]
pub struct EnvProviderFactory {
    config: AiConfig,
}

impl EnvProviderFactory {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }
}

impl ProviderFactory for EnvProviderFactory {
    fn build(&self) -> Result<BoxAiProvider, AiError> {
        create_provider(&self.config)
    }
}
