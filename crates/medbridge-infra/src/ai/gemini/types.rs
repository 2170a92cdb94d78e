//! Wire types for the Gemini `generateContent` REST API.
//!
//! Field names follow Google's camelCase JSON convention. Only the
//! subset of the API surface we actually use is modelled here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub safety_settings: Vec<SafetySetting>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// The harm categories the API lets callers configure.
pub const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Disable provider-side filtering for every configurable category.
/// Clinical conversations routinely trip medical-content heuristics,
/// so filtering is left to the application layer.
pub fn permissive_safety_settings() -> Vec<SafetySetting> {
    HARM_CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category: (*category).to_string(),
            threshold: "BLOCK_NONE".to_string(),
        })
        .collect()
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: String, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            safety_settings: permissive_safety_settings(),
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl GenerateContentResponse {
    /// The text of the first candidate, if the model produced one.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|part| part.text.as_str())
    }

    /// Whether the response indicates the prompt or the completion was
    /// suppressed by the provider's safety filters.
    pub fn is_safety_blocked(&self) -> bool {
        let prompt_blocked = self
            .prompt_feedback
            .as_ref()
            .is_some_and(|feedback| feedback.block_reason.is_some());
        let candidate_blocked = self
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
            .is_some_and(|reason| reason == "SAFETY");
        prompt_blocked || candidate_blocked
    }
}
