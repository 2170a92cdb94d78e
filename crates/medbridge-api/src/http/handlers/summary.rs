//! Conversation summary endpoint handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Deserialize;

use medbridge_types::ai::ConversationTurn;

use crate::http::error::AppError;
use crate::http::response::SummaryBody;
use crate::state::AppState;

/// Request body for generating a summary.
///
/// The client sends the turns it wants summarized; nothing is read from
/// the database, so the frontend can summarize a filtered view.
#[derive(Debug, Deserialize)]
pub struct GenerateSummaryRequest {
    #[serde(default)]
    pub messages: Vec<ConversationTurn>,
}

/// POST /api/summary/generate - Produce a structured clinical note.
pub async fn generate_summary(
    State(state): State<AppState>,
    body: Result<Json<GenerateSummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryBody>, AppError> {
    let Json(body) = body.map_err(|_| AppError::Validation("Invalid JSON".to_string()))?;

    if body.messages.is_empty() {
        return Err(AppError::Validation("Messages array is required".to_string()));
    }

    let summary = state
        .translation
        .summarize(&body.messages)
        .await
        .map_err(AppError::Summary)?;

    tracing::info!(turns = body.messages.len(), "summary generated");

    Ok(Json(SummaryBody { summary }))
}
