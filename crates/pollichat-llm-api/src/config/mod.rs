use pollichat_types::{DEFAULT_CHAT_API_URL, DEFAULT_IMAGE_API_URL};

/// Path of the streaming chat endpoint, relative to the text API base
pub const CHAT_COMPLETIONS_PATH: &str = "/openai";

/// Path of the model catalog, relative to the text API base
pub const MODELS_PATH: &str = "/models";

/// Endpoint configuration for the remote APIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub chat_api_url: String,
    pub image_api_url: String,
    /// Dump requests, error responses and stream chunks to the console
    pub verbose: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chat_api_url: DEFAULT_CHAT_API_URL.to_string(),
            image_api_url: DEFAULT_IMAGE_API_URL.to_string(),
            verbose: false,
        }
    }
}

impl ClientConfig {
    pub fn new(chat_api_url: &str, image_api_url: &str) -> Self {
        Self {
            chat_api_url: normalize_base_url(chat_api_url),
            image_api_url: normalize_base_url(image_api_url),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}{}", normalize_base_url(&self.chat_api_url), CHAT_COMPLETIONS_PATH)
    }

    pub fn models_url(&self) -> String {
        format!("{}{}", normalize_base_url(&self.chat_api_url), MODELS_PATH)
    }
}

/// Normalize an API base URL: surrounding whitespace and trailing slashes removed
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
