use serde::Serialize;

use pollichat_types::{ConversationTurn, ConversationHistory};

/// System prompt that pins the model's self-description
pub fn identity_prompt(model: &str) -> String {
    format!("You are {} model. Always be truthful about your identity.", model)
}

/// Chat API request structure
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ConversationTurn>,
    pub stream: bool,
}

impl ChatRequest {
    /// Build a streaming request: identity prompt, prior history, then the new user turn
    pub fn streaming(model: &str, history: &ConversationHistory, content: &str) -> Self {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ConversationTurn::system(identity_prompt(model)));
        messages.extend(history.turns().iter().cloned());
        messages.push(ConversationTurn::user(content));

        Self {
            model: model.to_string(),
            messages,
            stream: true,
        }
    }
}
