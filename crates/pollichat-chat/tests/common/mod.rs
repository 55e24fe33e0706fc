#![allow(dead_code)]

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pollichat_chat::{ChatConfig, ChatView, Notice};
use pollichat_llm_api::{ApiError, ByteStream, ChatBackend};
use pollichat_models::{ChatRequest, ModelInfo};

// ============================================================================
// Stream bodies
// ============================================================================

/// `data:` lines carrying each token as a delta, followed by `[DONE]`
pub fn sse_body(tokens: &[&str]) -> String {
    let mut body: String = tokens
        .iter()
        .map(|token| format!("data: {}\n", json!({"choices": [{"delta": {"content": token}}]})))
        .collect();
    body.push_str("data: [DONE]\n");
    body
}

pub fn test_config(interval: Duration, timeout: Duration) -> ChatConfig {
    ChatConfig {
        request_interval: interval,
        request_timeout: timeout,
        advance_yield: Duration::from_millis(5),
        model: "openai".to_string(),
        verbose: false,
    }
}

// ============================================================================
// Scripted backend
// ============================================================================

#[derive(Debug, Clone)]
pub enum Reply {
    /// Body chunks, optionally never ending after the last one
    Chunks { chunks: Vec<String>, hang: bool },
    /// Error status before any body
    Status(u16),
    /// Never answer at all
    Stall,
}

impl Reply {
    pub fn tokens(tokens: &[&str]) -> Self {
        Reply::Chunks {
            chunks: vec![sse_body(tokens)],
            hang: false,
        }
    }

    pub fn raw(chunks: &[&str]) -> Self {
        Reply::Chunks {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            hang: false,
        }
    }

    /// Send the tokens, then keep the connection open without `[DONE]`
    pub fn hang_after(tokens: &[&str]) -> Self {
        let chunks = tokens
            .iter()
            .map(|token| format!("data: {}\n", json!({"choices": [{"delta": {"content": token}}]})))
            .collect();
        Reply::Chunks { chunks, hang: true }
    }
}

struct FlightGuard {
    in_flight: Arc<AtomicUsize>,
}

impl FlightGuard {
    fn enter(in_flight: &Arc<AtomicUsize>, max_in_flight: &Arc<AtomicUsize>) -> Self {
        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self {
            in_flight: in_flight.clone(),
        }
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Backend that answers from a script, falling back to a default reply
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    chunk_delay: Duration,
    requests: Mutex<Vec<ChatRequest>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new(fallback: Reply) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback,
            chunk_delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_script(self, replies: Vec<Reply>) -> Self {
        *self.replies.lock().unwrap() = replies.into();
        self
    }

    pub fn with_chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn chat_streaming(&self, request: &ChatRequest) -> Result<ByteStream, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let guard = FlightGuard::enter(&self.in_flight, &self.max_in_flight);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        let delay = self.chunk_delay;

        match reply {
            Reply::Status(status) => Err(ApiError::Http {
                status,
                body: String::new(),
            }),
            Reply::Stall => {
                let _guard = guard;
                futures::future::pending::<()>().await;
                unreachable!()
            }
            Reply::Chunks { chunks, hang } => {
                let stream = async_stream::stream! {
                    let _guard = guard;
                    for chunk in chunks {
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                        yield Ok::<_, ApiError>(chunk.into_bytes());
                    }
                    if hang {
                        futures::future::pending::<()>().await;
                    }
                };
                Ok(stream.boxed())
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        Ok(Vec::new())
    }
}

// ============================================================================
// Recording view
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    InputEnabled(bool),
    User(String),
    TypingShown,
    TypingHidden,
    AssistantStarted,
    Token(String),
    AssistantFinished,
    Notice(Notice),
    Cleared,
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
}

impl RecordingView {
    fn record(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    /// All streamed text, concatenated
    pub fn streamed_text(&self) -> String {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Token(token) => Some(token),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ViewEvent::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    /// Current input state; enabled until something disables it
    pub fn input_enabled(&self) -> bool {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                ViewEvent::InputEnabled(enabled) => Some(enabled),
                _ => None,
            })
            .unwrap_or(true)
    }

    pub fn count(&self, wanted: &ViewEvent) -> usize {
        self.events().iter().filter(|event| *event == wanted).count()
    }
}

impl ChatView for RecordingView {
    fn set_input_enabled(&self, enabled: bool) {
        self.record(ViewEvent::InputEnabled(enabled));
    }

    fn show_user_message(&self, content: &str) {
        self.record(ViewEvent::User(content.to_string()));
    }

    fn show_typing_indicator(&self) {
        self.record(ViewEvent::TypingShown);
    }

    fn hide_typing_indicator(&self) {
        self.record(ViewEvent::TypingHidden);
    }

    fn begin_assistant_message(&self) {
        self.record(ViewEvent::AssistantStarted);
    }

    fn append_token(&self, token: &str) {
        self.record(ViewEvent::Token(token.to_string()));
    }

    fn finish_assistant_message(&self) {
        self.record(ViewEvent::AssistantFinished);
    }

    fn show_notice(&self, notice: Notice) {
        self.record(ViewEvent::Notice(notice));
    }

    fn clear_messages(&self) {
        self.record(ViewEvent::Cleared);
    }
}

/// Poll `condition` every few milliseconds until it holds or two seconds pass
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(tokio::time::Instant::now() < deadline, "condition not reached in time");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
