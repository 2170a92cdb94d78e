//! Response body types shared by the message endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use medbridge_types::conversation::{Message, Sender};

/// Wire representation of a stored message.
///
/// `audioUrl` is always present and null for text messages, so the
/// frontend can branch on it without checking `hasAudio` first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub translated_text: String,
    /// Local wall-clock time, e.g. `"02:30 PM"`.
    pub timestamp: String,
    pub has_audio: bool,
    pub audio_url: Option<String>,
}

impl MessageBody {
    pub fn from_message(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            sender: message.sender,
            text: message.text.clone().unwrap_or_default(),
            translated_text: message.translated_text.clone().unwrap_or_default(),
            timestamp: format_clock_time(&message.created_at),
            has_audio: message.has_audio(),
            audio_url: message
                .audio_path
                .as_ref()
                .map(|path| format!("/media/{path}")),
        }
    }
}

/// Body of a successful summary response.
#[derive(Debug, Serialize)]
pub struct SummaryBody {
    pub summary: String,
}

/// Body of a search response.
#[derive(Debug, Serialize)]
pub struct SearchBody {
    pub results: Vec<MessageBody>,
}

/// Render a UTC timestamp as the server-local 12-hour clock time.
fn format_clock_time(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&chrono::Local)
        .format("%I:%M %p")
        .to_string()
}
