use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// A message waiting to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedRequest {
    pub content: String,
    pub enqueued_at: Instant,
}

/// FIFO of outgoing messages with single-flight dispatch.
///
/// Dispatch is a two-step handshake so that pacing can happen without holding
/// a lock: [`reserve`](Self::reserve) claims the busy flag and says how long to
/// wait, [`begin`](Self::begin) pops the head once the wait is over, and
/// [`complete`](Self::complete) releases the flag. While the flag is held no
/// other caller can reserve, so at most one request is ever in flight.
#[derive(Debug)]
pub struct RequestQueue {
    pending: VecDeque<QueuedRequest>,
    busy: bool,
    last_dispatch: Option<Instant>,
    min_interval: Duration,
}

impl RequestQueue {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            pending: VecDeque::new(),
            busy: false,
            last_dispatch: None,
            min_interval,
        }
    }

    /// Append a message. Blank messages are rejected and `false` is returned.
    pub fn enqueue(&mut self, content: &str) -> bool {
        if content.trim().is_empty() {
            return false;
        }

        self.pending.push_back(QueuedRequest {
            content: content.to_string(),
            enqueued_at: Instant::now(),
        });
        true
    }

    /// Claim the dispatch slot.
    ///
    /// Returns `None` when a request is already in flight or nothing is
    /// waiting. Otherwise the slot is held and the returned duration is how
    /// long the caller must wait before calling [`begin`](Self::begin).
    pub fn reserve(&mut self, now: Instant) -> Option<Duration> {
        if self.busy || self.pending.is_empty() {
            return None;
        }

        self.busy = true;
        Some(self.wait_at(now))
    }

    /// Pop the next request and stamp the dispatch time.
    ///
    /// Must follow a successful `reserve`. Returns `None` (and frees the
    /// slot) if the queue was emptied in the meantime.
    pub fn begin(&mut self, now: Instant) -> Option<QueuedRequest> {
        debug_assert!(self.busy, "begin() without reserve()");

        match self.pending.pop_front() {
            Some(request) => {
                self.last_dispatch = Some(now);
                Some(request)
            }
            None => {
                self.busy = false;
                None
            }
        }
    }

    /// Release the slot after the request reached a terminal state
    pub fn complete(&mut self) {
        self.busy = false;
    }

    /// Time left before the next dispatch may start
    pub fn wait_at(&self, now: Instant) -> Duration {
        match self.last_dispatch {
            Some(last) => self.min_interval.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waiting messages, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &QueuedRequest> {
        self.pending.iter()
    }
}
