//! Configuration types for Medbridge.
//!
//! `AppConfig` represents the optional `config.toml` in the data directory.
//! Every field has a default so an empty or absent file is valid; the
//! `AI_PROVIDER` environment variable can override the configured provider
//! at load time (handled by the infra loader).

use serde::{Deserialize, Serialize};

use crate::ai::ProviderKind;

/// Top-level configuration, loaded from `{data_dir}/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Lookup key for the lazily created conversation.
    #[serde(default = "default_conversation_key")]
    pub conversation_key: String,

    #[serde(default)]
    pub ai: AiConfig,
}

/// AI provider selection and request tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Which backend translates and summarizes. `AI_PROVIDER` overrides.
    #[serde(default)]
    pub provider: ProviderKind,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Hard cap on generated tokens per provider call.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Bound on each provider HTTP request. No retries are performed.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_conversation_key() -> String {
    "default".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_output_tokens() -> u32 {
    1500
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            conversation_key: default_conversation_key(),
            ai: AiConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            gemini_model: default_gemini_model(),
            openai_model: default_openai_model(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
