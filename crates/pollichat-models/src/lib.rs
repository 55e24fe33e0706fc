// Models module - data structures for API communication
pub mod catalog;
pub mod image;
pub mod requests;
pub mod responses;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use catalog::{classify_model, group_models, ModelGroup, ModelInfo, ModelOption, SPECIAL_MODELS};
pub use image::{ImageModel, SizePreset, IMAGE_MODELS, MAX_HEIGHT, MAX_WIDTH, MIN_DIMENSION, PROMPT_TEMPLATES};
pub use requests::{identity_prompt, ChatRequest};
pub use responses::{StreamChunk, CHOICE_TEXT_POINTER, DELTA_CONTENT_POINTER, TOP_LEVEL_CONTENT_POINTER};
