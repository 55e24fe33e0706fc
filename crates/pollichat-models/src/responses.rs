use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// Streaming Response Structures
// ============================================================================
//
// Providers behind the text API disagree on where the incremental text lives
// and on the types of every other field. Each token location is looked up on
// its own, so an odd `model` or `finish_reason` never hides the text.

/// JSON pointer of the chat-style delta text
pub const DELTA_CONTENT_POINTER: &str = "/choices/0/delta/content";

/// JSON pointer of the completion-style text
pub const CHOICE_TEXT_POINTER: &str = "/choices/0/text";

/// JSON pointer of the plain top-level text
pub const TOP_LEVEL_CONTENT_POINTER: &str = "/content";

/// Streaming chunk from chat API, kept as parsed JSON
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StreamChunk {
    raw: Value,
}

impl From<Value> for StreamChunk {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

impl StreamChunk {
    /// String at `pointer`; anything else (missing, null, number, object) is `None`
    pub fn text_at(&self, pointer: &str) -> Option<&str> {
        self.raw.pointer(pointer).and_then(Value::as_str)
    }

    /// `choices[0].delta.content`
    pub fn delta_content(&self) -> Option<&str> {
        self.text_at(DELTA_CONTENT_POINTER)
    }

    /// `choices[0].text` (completion-style providers)
    pub fn choice_text(&self) -> Option<&str> {
        self.text_at(CHOICE_TEXT_POINTER)
    }

    /// Top-level `content` (plain providers)
    pub fn top_level_content(&self) -> Option<&str> {
        self.text_at(TOP_LEVEL_CONTENT_POINTER)
    }

    /// `model`, when the provider reports it as a string
    pub fn model(&self) -> Option<&str> {
        self.text_at("/model")
    }
}
