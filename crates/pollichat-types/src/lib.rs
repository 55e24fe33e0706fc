//! Core types and structures for pollichat
//!
//! This crate provides the foundational types used across all pollichat crates:
//! conversation turns, the in-memory conversation history and the shared
//! timing/endpoint constants.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Base URL of the text (chat completion + model catalog) API
pub const DEFAULT_CHAT_API_URL: &str = "https://text.pollinations.ai";

/// Base URL of the image generation API
pub const DEFAULT_IMAGE_API_URL: &str = "https://image.pollinations.ai";

/// Model selected when nothing else was chosen
pub const DEFAULT_MODEL: &str = "openai";

/// Minimum gap between the start of two consecutive chat requests
pub const REQUEST_INTERVAL: Duration = Duration::from_millis(3000);

/// Deadline for one chat round-trip, streaming included
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Pause before the queue looks for the next request after a round-trip
pub const ADVANCE_YIELD: Duration = Duration::from_millis(100);

// ============================================================================
// Conversation Types
// ============================================================================

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in the conversation, serialized in the OpenAI-compatible shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    #[serde(deserialize_with = "deserialize_string_or_null", default)]
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Ordered transcript of completed exchanges.
///
/// The history only ever grows by a matched user/assistant pair, so a
/// failed or aborted turn can never leave half an exchange behind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one completed exchange
    pub fn push_exchange(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.turns.push(ConversationTurn::user(user));
        self.turns.push(ConversationTurn::assistant(assistant));
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of completed user/assistant exchanges
    pub fn exchanges(&self) -> usize {
        self.turns.len() / 2
    }
}

/// Helper function to deserialize string or null values
pub fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}
