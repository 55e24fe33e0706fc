//! # pollichat-llm-api
//!
//! HTTP clients for the two public generative-AI APIs pollichat talks to:
//! - the text API: streaming chat completion (`POST /openai`) and the model
//!   catalog (`GET /models`)
//! - the image API: `GET /prompt/{prompt}` returning the generated image
//!
//! ## Features
//!
//! - **Backend trait**: `ChatBackend` is the seam the chat core streams through,
//!   so the queue and session logic can run against a fake in tests
//! - **Raw streaming**: chat responses are handed back as undecoded byte chunks;
//!   line splitting and event parsing live in `pollichat-chat`
//! - **Validated image requests**: sizes and prompts are checked before any
//!   URL is built
//!
//! ## Example
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use pollichat_llm_api::{ChatBackend, ClientConfig, PollinationsClient};
//! use pollichat_models::ChatRequest;
//! use pollichat_types::ConversationHistory;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PollinationsClient::new(ClientConfig::default());
//!     let request = ChatRequest::streaming("openai", &ConversationHistory::new(), "Hello!");
//!
//!     let mut chunks = client.chat_streaming(&request).await?;
//!     while let Some(chunk) = chunks.next().await {
//!         print!("{}", String::from_utf8_lossy(&chunk?));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod image;


// Re-export commonly used types
pub use client::{ByteStream, ChatBackend, PollinationsClient};
pub use config::{normalize_base_url, ClientConfig, CHAT_COMPLETIONS_PATH, MODELS_PATH};
pub use error::ApiError;
pub use image::{find_model, random_prompt, random_seed, ImageClient, ImageError, ImageRequest, ImageSize, COMPARE_DELAY};
