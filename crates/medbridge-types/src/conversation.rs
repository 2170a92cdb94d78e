//! Conversation and message types for Medbridge.
//!
//! A conversation is the single doctor-patient session this MVP tracks,
//! looked up by a unique key. Messages are immutable once created and
//! ordered by creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('Doctor', 'Patient'))`
///
/// Wire values are exact: `"doctor"` is rejected, only the capitalized
/// forms are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    Doctor,
    Patient,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Doctor => write!(f, "Doctor"),
            Sender::Patient => write!(f, "Patient"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Doctor" => Ok(Sender::Doctor),
            "Patient" => Ok(Sender::Patient),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A doctor-patient conversation.
///
/// Lazily created on first use through an atomic get-or-create keyed on
/// `key`; never deleted by normal operation. Deleting one cascades to all
/// owned messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: i64,
    pub key: String,
    pub created_at: DateTime<Utc>,
}

/// A single message within a conversation.
///
/// Created exactly once per successful send/upload request -- translation
/// must succeed first -- and never mutated afterwards. `text` carries the
/// original input (or the audio placeholder), `translated_text` the
/// provider output, and `audio_path` the stored blob location for audio
/// messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: i64,
    pub sender: Sender,
    pub text: Option<String>,
    pub translated_text: Option<String>,
    pub audio_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// True when this message carries a stored audio attachment.
    pub fn has_audio(&self) -> bool {
        self.audio_path.is_some()
    }
}
