//! Text message endpoint handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use medbridge_core::ai::service::DEFAULT_TARGET_LANGUAGE;
use medbridge_core::conversation::repository::ConversationRepository;
use medbridge_types::conversation::{Message, Sender};

use crate::http::error::AppError;
use crate::http::response::MessageBody;
use crate::state::AppState;

/// Request body for sending a text message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sender: String,
    pub target_language: Option<String>,
}

/// POST /api/messages/send - Translate a text message and store it.
///
/// The message row is only created after translation succeeds; a failed
/// provider call leaves no trace in the conversation.
pub async fn send_message(
    State(state): State<AppState>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    let Json(body) = body.map_err(|_| AppError::Validation("Invalid JSON".to_string()))?;

    let text = body.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }

    let sender: Sender = body.sender.parse().map_err(|_| {
        AppError::Validation("Sender must be \"Doctor\" or \"Patient\"".to_string())
    })?;

    let target_language = body
        .target_language
        .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());

    let conversation = state
        .conversation_repo
        .get_or_create(&state.conversation_key)
        .await?;

    let translated = state
        .translation
        .translate(text, &target_language)
        .await
        .map_err(AppError::Translation)?;

    let message = Message {
        id: Uuid::now_v7(),
        conversation_id: conversation.id,
        sender,
        text: Some(text.to_string()),
        translated_text: Some(translated),
        audio_path: None,
        created_at: Utc::now(),
    };
    state.conversation_repo.save_message(&message).await?;

    tracing::info!(message_id = %message.id, sender = %sender, "text message stored");

    Ok((StatusCode::CREATED, Json(MessageBody::from_message(&message))))
}
