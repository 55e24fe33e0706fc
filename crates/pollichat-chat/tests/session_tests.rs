mod common;

use common::{RecordingView, Reply, ScriptedBackend, ViewEvent};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use pollichat_chat::{AbortReason, ChatSession, SessionError, SessionOutcome, SessionState};
use pollichat_llm_api::ApiError;
use pollichat_types::ConversationHistory;

#[tokio::test]
async fn test_session_completes() {
    let backend = ScriptedBackend::new(Reply::tokens(&["4"]));
    let view = RecordingView::default();
    let mut history = ConversationHistory::new();
    history.push_exchange("2+1?", "3");

    let session = ChatSession::new("openai", "2+2?", Duration::from_secs(5), CancellationToken::new());
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.timeout_at() - session.started_at(), Duration::from_secs(5));

    let outcome = session.run(&backend, &view, &history).await;
    assert_eq!(outcome.reply(), Some("4"));
    assert_eq!(outcome.state(), SessionState::Completed);
    assert!(outcome.state().is_terminal());

    // System prompt, two prior turns, new message
    assert_eq!(backend.requests()[0].messages.len(), 4);
    // History is read, never written, by the session
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn test_pre_cancelled_session_aborts() {
    let backend = ScriptedBackend::new(Reply::tokens(&["never"]));
    let view = RecordingView::default();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let session = ChatSession::new("openai", "hello", Duration::from_secs(5), cancel);
    let outcome = session.run(&backend, &view, &ConversationHistory::new()).await;

    assert_eq!(outcome, SessionOutcome::Aborted(AbortReason::Reset));
    assert!(backend.requests().is_empty());
    assert!(view.input_enabled());
}

#[tokio::test]
async fn test_dropped_session_restores_input() {
    let backend = ScriptedBackend::new(Reply::hang_after(&["x"]));
    let view = RecordingView::default();
    let history = ConversationHistory::new();

    let session = ChatSession::new("openai", "hello", Duration::from_secs(60), CancellationToken::new());
    let run = session.run(&backend, &view, &history);
    let _ = tokio::time::timeout(Duration::from_millis(50), run).await;

    assert_eq!(view.events().last(), Some(&ViewEvent::InputEnabled(true)));
}

#[test]
fn test_api_error_mapping() {
    let err = SessionError::from(ApiError::Http {
        status: 429,
        body: "slow down".to_string(),
    });
    assert_eq!(err.to_string(), "HTTP error! status: 429");

    let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = SessionError::from(ApiError::Decode(decode));
    assert!(matches!(err, SessionError::Stream(_)));

    let err = SessionError::from(ApiError::InvalidUrl("nope".to_string()));
    assert!(matches!(err, SessionError::Network(_)));
}
