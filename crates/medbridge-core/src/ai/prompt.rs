//! Prompt construction shared by both AI providers.
//!
//! Centralizing the wording keeps the output contract in one place: the
//! translate instruction constrains the model to return ONLY the
//! translation, and the summary prompts name the five note sections in
//! their fixed order.

use medbridge_types::ai::ConversationTurn;

/// The five sections of the structured medical note, in order.
pub const NOTE_SECTIONS: [&str; 5] = [
    "Chief Complaint",
    "Symptoms",
    "Assessment",
    "Treatment Plan",
    "Follow-up",
];

/// System instruction for chat-style translate calls (OpenAI).
pub fn translate_instruction(target_language: &str) -> String {
    format!("Translate medical text to {target_language}. Return ONLY translation.")
}

/// Single-prompt translate form (Gemini), carrying the text inline.
pub fn translate_prompt(text: &str, target_language: &str) -> String {
    format!(
        "You are a professional medical translator. Translate the following text into \
         {target_language}. Keep all medical terms accurate. Provide ONLY the translation.\
         \n\nText: {text}"
    )
}

/// System instruction for chat-style summarize calls (OpenAI).
pub const SUMMARY_INSTRUCTION: &str = "You are a medical assistant. Summarize the conversation \
     into a professional medical note with these sections: Chief Complaint, Symptoms, \
     Assessment, Treatment Plan, Follow-up.";

/// Single-prompt summarize form (Gemini), carrying the conversation inline.
pub fn summary_prompt(turns: &[ConversationTurn]) -> String {
    format!(
        "Summarize this doctor-patient conversation into a professional medical note with \
         these sections:\n1. Chief Complaint\n2. Symptoms\n3. Assessment\n4. Treatment Plan\
         \n5. Follow-up\n\nConversation:\n{}",
        join_turns(turns)
    )
}

/// Format conversation turns as `sender: text` lines.
pub fn join_turns(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.sender, t.text))
        .collect::<Vec<_>>()
        .join("\n")
}
