//! GeminiProvider -- concrete [`AiProvider`] implementation for Google Gemini.
//!
//! Talks to the native `generateContent` REST API rather than Google's
//! OpenAI-compatible endpoint: the native API is the only one that accepts
//! per-request safety settings, which clinical text needs relaxed.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use medbridge_core::ai::prompt;
use medbridge_core::ai::provider::AiProvider;
use medbridge_types::ai::{AiError, ConversationTurn};
use medbridge_types::config::AiConfig;

use self::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Google Gemini AI provider.
///
/// Implements [`AiProvider`] against the `generateContent` endpoint.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the `x-goog-api-key` request header. It never appears in
/// Debug output, Display output, or tracing logs.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    max_output_tokens: u32,
    request_timeout: Duration,
}

impl GeminiProvider {
    /// Low temperature keeps translations literal.
    const TRANSLATE_TEMPERATURE: f32 = 0.2;

    /// Summaries get a bit more freedom to rephrase.
    const SUMMARY_TEMPERATURE: f32 = 0.5;

    /// Create a new Gemini provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key wrapped in SecretString
    /// * `config` - AI configuration (model name, token cap, timeout)
    pub fn new(api_key: SecretString, config: &AiConfig) -> Self {
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: config.gemini_model.clone(),
            max_output_tokens: config.max_output_tokens,
            request_timeout,
        }
    }

    /// The model this provider sends requests to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full `generateContent` URL for the configured model.
    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Send one prompt and return the model's trimmed text output.
    async fn generate(&self, prompt: String, temperature: f32) -> Result<String, AiError> {
        let body = GenerateContentRequest::from_prompt(prompt, temperature, self.max_output_tokens);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        seconds: self.request_timeout.as_secs(),
                    }
                } else {
                    AiError::Provider {
                        message: format!("HTTP request failed: {e}"),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => AiError::AuthenticationFailed,
                429 => AiError::RateLimited,
                _ => AiError::Provider {
                    message: format!("HTTP {status}: {}", error_message(&error_body)),
                },
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AiError::Deserialization(format!("failed to parse response: {e}")))?;

        if parsed.is_safety_blocked() {
            return Err(AiError::SafetyBlocked);
        }

        // No candidates without an explicit block reason still means the
        // model declined to answer.
        let text = parsed.first_text().ok_or(AiError::SafetyBlocked)?;
        Ok(text.trim().to_string())
    }
}

// GeminiProvider intentionally does NOT derive Debug to prevent accidental
// exposure of internal state alongside the SecretString key.

/// Extract the human-readable message from an API error body, falling back
/// to the raw body when it is not the documented JSON shape.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

impl AiProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, AiError> {
        self.generate(
            prompt::translate_prompt(text, target_language),
            Self::TRANSLATE_TEMPERATURE,
        )
        .await
    }

    async fn summarize(&self, turns: &[ConversationTurn]) -> Result<String, AiError> {
        self.generate(prompt::summary_prompt(turns), Self::SUMMARY_TEMPERATURE)
            .await
    }
}
