//! Message search endpoint handler.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use medbridge_core::conversation::repository::ConversationRepository;

use crate::http::error::AppError;
use crate::http::response::{MessageBody, SearchBody};
use crate::state::AppState;

/// Query string for message search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/messages/search?q=keyword - Substring search over messages.
///
/// Matches case-insensitively against both original and translated text.
/// An empty or missing `q` returns an empty result set without touching
/// the database.
pub async fn search_messages(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchBody>, AppError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Ok(Json(SearchBody { results: Vec::new() }));
    }

    let conversation = state
        .conversation_repo
        .get_or_create(&state.conversation_key)
        .await?;

    let messages = state
        .conversation_repo
        .search_messages(conversation.id, query)
        .await?;

    tracing::debug!(query, hits = messages.len(), "message search");

    let results = messages.iter().map(MessageBody::from_message).collect();
    Ok(Json(SearchBody { results }))
}
