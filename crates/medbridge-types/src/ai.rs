//! AI provider taxonomy for Medbridge.
//!
//! `ProviderKind` names the two interchangeable translation/summarization
//! backends. `AiError` is the shared error taxonomy: configuration errors
//! (missing credential, caught before any network I/O) are distinct
//! variants from runtime invocation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt;
use std::str::FromStr;

/// Which AI backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// The environment variable holding this provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(format!("unknown AI provider: '{other}'")),
        }
    }
}

impl Default for ProviderKind {
    fn default() -> Self {
        ProviderKind::OpenAi
    }
}

/// One `{sender, text}` pair of a conversation, as fed to summarization.
///
/// Sender is free-form here: the summary endpoint accepts whatever labels
/// the client supplies and passes them through to the prompt verbatim.
/// Missing fields deserialize as empty strings rather than rejecting the
/// whole payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationTurn {
    pub sender: String,
    pub text: String,
}

/// Errors from the AI provider abstraction.
///
/// Two tiers: `MissingApiKey` is operator-caused configuration, raised by
/// the provider factory before any request is attempted. Everything else
/// is a runtime invocation failure.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("{key} is not configured")]
    MissingApiKey { key: String },

    #[error("provider request failed: {message}")]
    Provider { message: String },

    #[error("provider rejected the API key")]
    AuthenticationFailed,

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("content blocked by provider safety filters")]
    SafetyBlocked,

    #[error("provider request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("failed to parse provider response: {0}")]
    Deserialization(String),
}

impl AiError {
    /// True for the configuration tier (fail-fast, no network involved).
    pub fn is_configuration(&self) -> bool {
        matches!(self, AiError::MissingApiKey { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_roundtrip() {
        for kind in [ProviderKind::OpenAi, ProviderKind::Gemini] {
            let s = kind.to_string();
            let parsed: ProviderKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_provider_kind_parse_normalizes() {
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("  OPENAI  ".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert!("claude".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_kind_default_is_openai() {
        assert_eq!(ProviderKind::default(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_provider_kind_serde() {
        assert_eq!(serde_json::to_string(&ProviderKind::Gemini).unwrap(), "\"gemini\"");
        let parsed: ProviderKind = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(parsed, ProviderKind::OpenAi);
    }

    #[test]
    fn test_api_key_env_names() {
        assert_eq!(ProviderKind::OpenAi.api_key_env(), "OPENAI_API_KEY");
        assert_eq!(ProviderKind::Gemini.api_key_env(), "GEMINI_API_KEY");
    }

    #[test]
    fn test_conversation_turn_deserialize() {
        let json = r#"{"sender": "Doctor", "text": "How long have you had the fever?"}"#;
        let turn: ConversationTurn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.sender, "Doctor");
        assert_eq!(turn.text, "How long have you had the fever?");
    }

    #[test]
    fn test_conversation_turn_tolerates_missing_fields() {
        let turn: ConversationTurn = serde_json::from_str(r#"{"sender": "Patient"}"#).unwrap();
        assert_eq!(turn.sender, "Patient");
        assert_eq!(turn.text, "");

        let turn: ConversationTurn = serde_json::from_str("{}").unwrap();
        assert_eq!(turn.sender, "");
    }

    #[test]
    fn test_ai_error_display() {
        let err = AiError::MissingApiKey {
            key: "GEMINI_API_KEY".to_string(),
        };
        assert_eq!(err.to_string(), "GEMINI_API_KEY is not configured");

        let err = AiError::Provider {
            message: "502 Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "provider request failed: 502 Bad Gateway");

        let err = AiError::Timeout { seconds: 30 };
        assert_eq!(err.to_string(), "provider request timed out after 30s");
    }

    #[test]
    fn test_ai_error_tiers() {
        assert!(AiError::MissingApiKey {
            key: "OPENAI_API_KEY".to_string()
        }
        .is_configuration());
        assert!(!AiError::SafetyBlocked.is_configuration());
        assert!(!AiError::RateLimited.is_configuration());
    }
}
