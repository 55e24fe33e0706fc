use async_trait::async_trait;
use futures::stream::BoxStream;

use pollichat_models::{ChatRequest, ModelInfo};
use crate::error::ApiError;

pub mod pollinations;

pub use pollinations::PollinationsClient;

/// Raw response body of a streaming chat call, chunk by chunk, undecoded
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, ApiError>>;

/// Text API backend - the seam the chat core streams through
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Issue a streaming chat request.
    ///
    /// Resolves once the response headers arrived with a success status; a
    /// non-success status is reported as `ApiError::Http` without reading the
    /// stream. Dropping the returned stream aborts the underlying read.
    async fn chat_streaming(&self, request: &ChatRequest) -> Result<ByteStream, ApiError>;

    /// Fetch the model catalog
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ApiError>;
}
