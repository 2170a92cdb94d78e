//! Audio message endpoint handler.
//!
//! Audio is stored as an opaque blob and is not transcribed; the message
//! text is a fixed placeholder, translated like any other text so the
//! other party still sees something in their language.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use medbridge_core::ai::service::DEFAULT_TARGET_LANGUAGE;
use medbridge_core::conversation::repository::ConversationRepository;
use medbridge_core::storage::audio_store::AudioStore;
use medbridge_types::conversation::{Message, Sender};

use crate::http::error::AppError;
use crate::http::response::MessageBody;
use crate::state::AppState;

/// Text stored (and translated) in place of a transcript.
const AUDIO_PLACEHOLDER: &str = "Audio message";

/// POST /api/audio/upload - Store an audio message.
///
/// Multipart fields: `audio` (the blob, required), `sender` (required),
/// `targetLanguage` (optional). The blob is written to disk only after
/// translation of the placeholder succeeds.
pub async fn upload_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    let mut multipart =
        multipart.map_err(|_| AppError::Validation("Invalid form data".to_string()))?;

    let mut audio: Option<(Option<String>, Bytes)> = None;
    let mut sender_raw = String::new();
    let mut target_language: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("Invalid form data".to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                let filename = field.file_name().map(ToString::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::Validation("Invalid form data".to_string()))?;
                audio = Some((filename, data));
            }
            "sender" => {
                sender_raw = field
                    .text()
                    .await
                    .map_err(|_| AppError::Validation("Invalid form data".to_string()))?;
            }
            "targetLanguage" => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| AppError::Validation("Invalid form data".to_string()))?;
                target_language = Some(value);
            }
            _ => {}
        }
    }

    let Some((filename, data)) = audio else {
        return Err(AppError::Validation("Audio file is required".to_string()));
    };

    let sender: Sender = sender_raw.parse().map_err(|_| {
        AppError::Validation("Sender must be \"Doctor\" or \"Patient\"".to_string())
    })?;

    let target_language =
        target_language.unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());

    let conversation = state
        .conversation_repo
        .get_or_create(&state.conversation_key)
        .await?;

    let translated = state
        .translation
        .translate(AUDIO_PLACEHOLDER, &target_language)
        .await
        .map_err(AppError::Translation)?;

    let message_id = Uuid::now_v7();
    let stored = state
        .audio_store
        .save(&message_id, filename.as_deref(), &data)
        .await?;

    let message = Message {
        id: message_id,
        conversation_id: conversation.id,
        sender,
        text: Some(AUDIO_PLACEHOLDER.to_string()),
        translated_text: Some(translated),
        audio_path: Some(stored.path),
        created_at: Utc::now(),
    };
    state.conversation_repo.save_message(&message).await?;

    tracing::info!(
        message_id = %message.id,
        sender = %sender,
        bytes = data.len(),
        "audio message stored"
    );

    Ok((StatusCode::CREATED, Json(MessageBody::from_message(&message))))
}
