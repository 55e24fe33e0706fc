use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use pollichat_llm_api::ChatBackend;
use pollichat_types::{ConversationHistory, ADVANCE_YIELD, DEFAULT_MODEL, REQUEST_INTERVAL, REQUEST_TIMEOUT};

use crate::queue::RequestQueue;
use crate::session::{ChatSession, SessionOutcome};
use crate::view::ChatView;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Minimum spacing between the starts of two requests
    pub request_interval: Duration,
    /// Deadline for one round-trip, streaming included
    pub request_timeout: Duration,
    /// Pause before the dispatcher looks at the queue again
    pub advance_yield: Duration,
    pub model: String,
    pub verbose: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            request_interval: REQUEST_INTERVAL,
            request_timeout: REQUEST_TIMEOUT,
            advance_yield: ADVANCE_YIELD,
            model: DEFAULT_MODEL.to_string(),
            verbose: false,
        }
    }
}

/// Result of one dispatched message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub content: String,
    pub model: String,
    pub started_at: Instant,
    pub outcome: SessionOutcome,
}

// ============================================================================
// Controller
// ============================================================================

struct ControllerState {
    queue: RequestQueue,
    history: ConversationHistory,
    model: String,
    active: Option<CancellationToken>,
    /// Bumped on every reset; a session only commits if it is unchanged
    epoch: u64,
}

struct Inner {
    state: Mutex<ControllerState>,
    backend: Arc<dyn ChatBackend>,
    view: Arc<dyn ChatView>,
    config: ChatConfig,
    wake: Notify,
    idle: Notify,
}

/// Frees the dispatch slot when dropped
struct DispatchSlot<'a> {
    inner: &'a Inner,
}

impl Drop for DispatchSlot<'_> {
    fn drop(&mut self) {
        {
            let mut state = self.inner.state.lock();
            state.queue.complete();
            state.active = None;
        }
        self.inner.idle.notify_waiters();
        self.inner.wake.notify_one();
    }
}

/// Owns the conversation: pending messages, committed history and the
/// selected model. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ChatController {
    inner: Arc<Inner>,
}

impl ChatController {
    pub fn new(backend: Arc<dyn ChatBackend>, view: Arc<dyn ChatView>, config: ChatConfig) -> Self {
        let state = ControllerState {
            queue: RequestQueue::new(config.request_interval),
            history: ConversationHistory::new(),
            model: config.model.clone(),
            active: None,
            epoch: 0,
        };

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                backend,
                view,
                config,
                wake: Notify::new(),
                idle: Notify::new(),
            }),
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.inner.config
    }

    /// Queue a message for sending. Blank input is ignored and `false` returned.
    pub fn submit(&self, content: &str) -> bool {
        let accepted = self.inner.state.lock().queue.enqueue(content);
        if accepted {
            self.inner.wake.notify_one();
        } else {
            log::debug!("ignoring blank message");
        }
        accepted
    }

    /// Dispatch the next queued message and drive it to a terminal state.
    ///
    /// Returns `None` without doing anything if the queue is empty or another
    /// message is in flight. Waits out the pacing interval before sending.
    pub async fn advance(&self) -> Option<SessionReport> {
        let wait = self.inner.state.lock().queue.reserve(Instant::now())?;
        let _slot = DispatchSlot { inner: &self.inner };

        if !wait.is_zero() {
            log::debug!("pacing: waiting {:?} before next request", wait);
            tokio::time::sleep(wait).await;
        }

        let (request, model, history, epoch, cancel, started_at) = {
            let mut state = self.inner.state.lock();
            let started_at = Instant::now();
            let request = state.queue.begin(started_at)?;
            let cancel = CancellationToken::new();
            state.active = Some(cancel.clone());
            (request, state.model.clone(), state.history.clone(), state.epoch, cancel, started_at)
        };

        log::info!("sending message to {} ({} turns of context)", model, history.len());

        let session = ChatSession::new(model.clone(), request.content.clone(), self.inner.config.request_timeout, cancel)
            .with_verbose(self.inner.config.verbose);
        let outcome = session
            .run(self.inner.backend.as_ref(), self.inner.view.as_ref(), &history)
            .await;

        if let SessionOutcome::Completed { reply } = &outcome {
            let mut state = self.inner.state.lock();
            if state.epoch == epoch {
                state.history.push_exchange(request.content.clone(), reply.clone());
            } else {
                log::info!("conversation was reset, discarding reply");
            }
        }

        Some(SessionReport {
            content: request.content,
            model,
            started_at,
            outcome,
        })
    }

    /// Dispatch loop: advance whenever there is work, sleep on `submit` otherwise
    pub async fn run(self) {
        loop {
            match self.advance().await {
                Some(report) => {
                    log::debug!("session ended: {:?}", report.outcome.state());
                    tokio::time::sleep(self.inner.config.advance_yield).await;
                }
                None => self.inner.wake.notified().await,
            }
        }
    }

    pub fn spawn_dispatcher(&self) -> JoinHandle<()> {
        tokio::spawn(self.clone().run())
    }

    /// Forget the conversation and cancel the reply in flight.
    /// Messages still waiting in the queue are kept.
    pub fn clear(&self) {
        {
            let mut state = self.inner.state.lock();
            Self::reset(&mut state);
        }
        self.inner.view.clear_messages();
    }

    /// Select another model. A non-empty conversation is cleared since its
    /// context belongs to the previous model. Returns whether the model changed.
    pub fn switch_model(&self, model: &str) -> bool {
        let model = model.trim();
        if model.is_empty() {
            return false;
        }

        let had_conversation = {
            let mut state = self.inner.state.lock();
            if state.model == model {
                return false;
            }

            log::info!("switching model {} -> {}", state.model, model);
            state.model = model.to_string();

            let had_conversation = !state.history.is_empty() || state.active.is_some();
            if had_conversation {
                Self::reset(&mut state);
            }
            had_conversation
        };

        if had_conversation {
            self.inner.view.clear_messages();
        }
        true
    }

    fn reset(state: &mut ControllerState) {
        state.history.clear();
        state.epoch += 1;
        if let Some(token) = state.active.take() {
            token.cancel();
        }
    }

    pub fn history(&self) -> ConversationHistory {
        self.inner.state.lock().history.clone()
    }

    pub fn current_model(&self) -> String {
        self.inner.state.lock().model.clone()
    }

    pub fn pending(&self) -> usize {
        self.inner.state.lock().queue.len()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.state.lock().queue.is_busy()
    }

    /// Nothing queued and nothing in flight
    pub fn is_idle(&self) -> bool {
        let state = self.inner.state.lock();
        state.queue.is_empty() && !state.queue.is_busy()
    }

    /// Resolve once the controller is idle. Needs a running dispatcher to
    /// make progress on queued messages.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.is_idle() {
                return;
            }
            notified.await;
        }
    }
}
