//! OpenAiProvider -- concrete [`AiProvider`] implementation for OpenAI.
//!
//! Uses [`async_openai`] for type-safe request/response handling against
//! the Chat Completions API. Translate and summarize each send a system
//! instruction plus one user message.

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, FinishReason,
};
use secrecy::{ExposeSecret, SecretString};

use medbridge_core::ai::prompt;
use medbridge_core::ai::provider::AiProvider;
use medbridge_types::ai::{AiError, ConversationTurn};
use medbridge_types::config::AiConfig;

/// OpenAI chat-completions provider.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`. Same defense-in-depth pattern
/// as [`super::gemini::GeminiProvider`].
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    model: String,
    max_completion_tokens: u32,
    request_timeout: Duration,
}

impl OpenAiProvider {
    /// Slightly warmer than Gemini's translate setting; summaries use the
    /// API default.
    const TRANSLATE_TEMPERATURE: f32 = 0.3;

    /// Create a new OpenAI provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key wrapped in SecretString
    /// * `config` - AI configuration (model name, token cap, timeout)
    pub fn new(api_key: SecretString, config: &AiConfig) -> Self {
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .expect("failed to create reqwest client");

        let openai_config = OpenAIConfig::new().with_api_key(api_key.expose_secret());

        Self {
            client: Client::with_config(openai_config).with_http_client(http_client),
            model: config.openai_model.clone(),
            max_completion_tokens: config.max_output_tokens,
            request_timeout,
        }
    }

    /// The model this provider sends requests to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build a two-message chat request: system instruction + user text.
    fn build_request(
        &self,
        instruction: &str,
        user_text: &str,
        temperature: Option<f32>,
    ) -> CreateChatCompletionRequest {
        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(
                        instruction.to_string(),
                    ),
                    name: None,
                }),
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                    content: ChatCompletionRequestUserMessageContent::Text(user_text.to_string()),
                    name: None,
                }),
            ],
            max_completion_tokens: Some(self.max_completion_tokens),
            temperature,
            ..Default::default()
        }
    }

    /// Send one chat request and return the model's trimmed text output.
    async fn send(&self, request: CreateChatCompletionRequest) -> Result<String, AiError> {
        let timeout_secs = self.request_timeout.as_secs();
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| map_openai_error(e, timeout_secs))?;

        let choice = response.choices.first().ok_or_else(|| AiError::Provider {
            message: "response contained no choices".to_string(),
        })?;

        if matches!(choice.finish_reason, Some(FinishReason::ContentFilter)) {
            return Err(AiError::SafetyBlocked);
        }

        let content = choice.message.content.clone().unwrap_or_default();
        Ok(content.trim().to_string())
    }
}

// OpenAiProvider intentionally does NOT derive Debug to prevent accidental
// exposure of internal state including the API key inside the async-openai
// Client.

impl AiProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, AiError> {
        let request = self.build_request(
            &prompt::translate_instruction(target_language),
            text,
            Some(Self::TRANSLATE_TEMPERATURE),
        );
        self.send(request).await
    }

    async fn summarize(&self, turns: &[ConversationTurn]) -> Result<String, AiError> {
        let request =
            self.build_request(prompt::SUMMARY_INSTRUCTION, &prompt::join_turns(turns), None);
        self.send(request).await
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`AiError`].
fn map_openai_error(err: async_openai::error::OpenAIError, timeout_secs: u64) -> AiError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                AiError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                AiError::RateLimited
            } else {
                AiError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if reqwest_err.is_timeout() {
                return AiError::Timeout {
                    seconds: timeout_secs,
                };
            }
            match reqwest_err.status().map(|s| s.as_u16()) {
                Some(401) => AiError::AuthenticationFailed,
                Some(429) => AiError::RateLimited,
                _ => AiError::Provider {
                    message: err.to_string(),
                },
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            AiError::Deserialization(format!("failed to parse response: {content}"))
        }
        _ => AiError::Provider {
            message: err.to_string(),
        },
    }
}
