//! One request/response round-trip.
//!
//! A session is created when the queue hands out a message and ends in exactly
//! one terminal state:
//!
//! ```text
//! Idle -> Sending -> Streaming -> Completed
//!            |           |
//!            +-----------+------> Failed | Aborted
//! ```
//!
//! The deadline covers the whole round-trip, headers and body alike.

use futures::StreamExt;
use std::mem;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use pollichat_llm_api::{ApiError, ChatBackend};
use pollichat_models::ChatRequest;
use pollichat_types::ConversationHistory;

use crate::stream::{decode_lines, EventParser, StreamEvent};
use crate::view::{ChatView, Notice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
    Streaming,
    Completed,
    Failed,
    Aborted,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed | SessionState::Failed | SessionState::Aborted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The deadline passed before the stream finished
    Timeout,
    /// The conversation was cleared or the model switched
    Reset,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("stream error: {0}")]
    Stream(String),
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Http { status, body } => SessionError::Http { status, body },
            ApiError::Transport(e) => SessionError::Network(e.to_string()),
            ApiError::InvalidUrl(url) => SessionError::Network(format!("invalid URL: {}", url)),
            ApiError::Decode(e) => SessionError::Stream(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed { reply: String },
    Failed(SessionError),
    Aborted(AbortReason),
}

impl SessionOutcome {
    pub fn state(&self) -> SessionState {
        match self {
            SessionOutcome::Completed { .. } => SessionState::Completed,
            SessionOutcome::Failed(_) => SessionState::Failed,
            SessionOutcome::Aborted(_) => SessionState::Aborted,
        }
    }

    pub fn reply(&self) -> Option<&str> {
        match self {
            SessionOutcome::Completed { reply } => Some(reply),
            _ => None,
        }
    }
}

enum Interrupt {
    Abort(AbortReason),
    Fail(SessionError),
}

/// Re-enables input however the session ends, including when its future is dropped
struct InputGuard<'a> {
    view: &'a dyn ChatView,
}

impl<'a> InputGuard<'a> {
    fn disable(view: &'a dyn ChatView) -> Self {
        view.set_input_enabled(false);
        Self { view }
    }
}

impl Drop for InputGuard<'_> {
    fn drop(&mut self) {
        self.view.set_input_enabled(true);
    }
}

pub struct ChatSession {
    model: String,
    content: String,
    cancel: CancellationToken,
    started_at: Instant,
    timeout_at: Instant,
    accumulated: String,
    state: SessionState,
    verbose: bool,
}

impl ChatSession {
    pub fn new(model: impl Into<String>, content: impl Into<String>, timeout: Duration, cancel: CancellationToken) -> Self {
        let started_at = Instant::now();
        Self {
            model: model.into(),
            content: content.into(),
            cancel,
            started_at,
            timeout_at: started_at + timeout,
            accumulated: String::new(),
            state: SessionState::Idle,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn timeout_at(&self) -> Instant {
        self.timeout_at
    }

    /// Text received so far
    pub fn accumulated(&self) -> &str {
        &self.accumulated
    }

    fn transition(&mut self, next: SessionState) {
        log::debug!("session [{}]: {:?} -> {:?}", self.model, self.state, next);
        self.state = next;
    }

    /// Send the message with `history` as context and stream the reply into `view`.
    ///
    /// The history is only read; committing the exchange is up to the caller.
    pub async fn run(mut self, backend: &dyn ChatBackend, view: &dyn ChatView, history: &ConversationHistory) -> SessionOutcome {
        let _input = InputGuard::disable(view);

        self.transition(SessionState::Sending);
        view.show_user_message(&self.content);
        view.show_typing_indicator();

        let request = ChatRequest::streaming(&self.model, history, &self.content);
        let deadline = tokio::time::sleep_until(self.timeout_at.into());
        tokio::pin!(deadline);
        let cancel = self.cancel.clone();

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Interrupt::Abort(AbortReason::Reset)),
            _ = &mut deadline => Err(Interrupt::Abort(AbortReason::Timeout)),
            result = self.exchange(backend, view, &request) => result,
        };

        match self.state {
            SessionState::Sending => view.hide_typing_indicator(),
            SessionState::Streaming => view.finish_assistant_message(),
            _ => {}
        }

        match result {
            Ok(()) => {
                self.transition(SessionState::Completed);
                SessionOutcome::Completed {
                    reply: mem::take(&mut self.accumulated),
                }
            }
            Err(Interrupt::Abort(reason)) => {
                log::warn!("request to {} aborted ({:?}) after {:?}", self.model, reason, self.started_at.elapsed());
                self.transition(SessionState::Aborted);
                view.show_notice(match reason {
                    AbortReason::Timeout => Notice::Timeout,
                    AbortReason::Reset => Notice::Cancelled,
                });
                SessionOutcome::Aborted(reason)
            }
            Err(Interrupt::Fail(err)) => {
                log::error!("request to {} failed: {}", self.model, err);
                self.transition(SessionState::Failed);
                view.show_notice(Notice::Failure);
                SessionOutcome::Failed(err)
            }
        }
    }

    async fn exchange(&mut self, backend: &dyn ChatBackend, view: &dyn ChatView, request: &ChatRequest) -> Result<(), Interrupt> {
        let chunks = backend
            .chat_streaming(request)
            .await
            .map_err(|e| Interrupt::Fail(e.into()))?;

        self.transition(SessionState::Streaming);
        view.hide_typing_indicator();
        view.begin_assistant_message();

        let mut parser = EventParser::new(self.verbose);
        let mut lines = Box::pin(decode_lines(chunks));

        while let Some(line) = lines.next().await {
            let line = line.map_err(|e| Interrupt::Fail(e.into()))?;
            match parser.parse(&line) {
                StreamEvent::Token(token) => {
                    view.append_token(&token);
                    self.accumulated.push_str(&token);
                }
                StreamEvent::Done => break,
                StreamEvent::Ignored => {}
            }
        }

        log::debug!("stream finished after {} data lines", parser.data_lines());
        Ok(())
    }
}
