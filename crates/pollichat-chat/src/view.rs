use std::fmt;

/// Terminal notices shown in place of an assistant reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Timeout,
    Failure,
    Cancelled,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Timeout => "Request timed out, please try again later.",
            Notice::Failure => "Sorry, something went wrong. Please try again later.",
            Notice::Cancelled => "Request cancelled.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Rendering surface driven by the chat core.
///
/// Calls arrive from the dispatcher task, so implementations must be
/// thread-safe; they should also be quick since tokens are appended one by
/// one as they stream in.
pub trait ChatView: Send + Sync {
    /// Enable or disable message input and model selection
    fn set_input_enabled(&self, enabled: bool);

    fn show_user_message(&self, content: &str);

    fn show_typing_indicator(&self);

    fn hide_typing_indicator(&self);

    /// Open an empty assistant message that tokens will be appended to
    fn begin_assistant_message(&self);

    fn append_token(&self, token: &str);

    /// Close the assistant message opened by `begin_assistant_message`
    fn finish_assistant_message(&self) {}

    fn show_notice(&self, notice: Notice);

    /// Remove every rendered message
    fn clear_messages(&self);
}
