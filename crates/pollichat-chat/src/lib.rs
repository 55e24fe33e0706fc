//! Streaming chat core for pollichat
//!
//! This crate turns a raw chat response body into tokens on screen and keeps
//! the conversation consistent while doing so:
//!
//! - [`stream::ChunkDecoder`] reassembles UTF-8 text and splits it into lines
//! - [`stream::EventParser`] extracts tokens from `data:` lines
//! - [`queue::RequestQueue`] serializes requests with a minimum start interval
//! - [`session::ChatSession`] runs one request/response round-trip
//! - [`controller::ChatController`] owns queue, history and model selection
//!   and drives sessions one at a time
//!
//! The UI is reached only through the [`view::ChatView`] trait.

pub mod controller;
pub mod queue;
pub mod session;
pub mod stream;
pub mod view;

// Re-export commonly used types
pub use controller::{ChatConfig, ChatController, SessionReport};
pub use queue::{QueuedRequest, RequestQueue};
pub use session::{AbortReason, ChatSession, SessionError, SessionOutcome, SessionState};
pub use stream::{decode_lines, parse_line, ChunkDecoder, EventParser, StreamEvent};
pub use view::{ChatView, Notice};
