//! Image generation requests.
//!
//! The image API is a plain `GET` whose response is the image itself, so the
//! interesting part is validation: everything is checked before a URL is built
//! and no request is ever issued for an empty prompt or an impossible size.

use rand::Rng;
use std::time::Duration;
use thiserror::Error;

use pollichat_models::{ImageModel, SizePreset, IMAGE_MODELS, MAX_HEIGHT, MAX_WIDTH, MIN_DIMENSION, PROMPT_TEMPLATES};
use crate::config::{normalize_base_url, ClientConfig};
use crate::error::ApiError;

/// Spacing between two generations in compare mode
pub const COMPARE_DELAY: Duration = Duration::from_millis(1000);

/// Largest seed handed out by [`random_seed`]
pub const MAX_SEED: u32 = 999_999;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("please enter a prompt")]
    EmptyPrompt,

    #[error("invalid image size {width}x{height}: each side must be at least {MIN_DIMENSION} pixels (max {MAX_WIDTH}x{MAX_HEIGHT})")]
    InvalidSize { width: u32, height: u32 },

    #[error("unknown image model: {0}")]
    UnknownModel(String),

    #[error("invalid image API URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Requested output size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Preset(SizePreset),
    Custom { width: u32, height: u32 },
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::Preset(SizePreset::Square)
    }
}

impl ImageSize {
    /// Final dimensions: clamped to the API maximum, then checked against the minimum
    pub fn resolve(&self) -> Result<(u32, u32), ImageError> {
        let (width, height) = match self {
            ImageSize::Preset(preset) => preset.dimensions(),
            ImageSize::Custom { width, height } => (*width, *height),
        };

        let width = width.min(MAX_WIDTH);
        let height = height.min(MAX_HEIGHT);

        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(ImageError::InvalidSize { width, height });
        }

        Ok((width, height))
    }
}

/// A validated image generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub seed: u32,
    pub model: ImageModel,
}

impl ImageRequest {
    /// Validate the inputs. A missing or zero seed is replaced by a random one.
    pub fn new(prompt: &str, size: ImageSize, seed: Option<u32>, model: ImageModel) -> Result<Self, ImageError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ImageError::EmptyPrompt);
        }

        let (width, height) = size.resolve()?;
        let seed = seed.filter(|s| *s > 0).unwrap_or_else(random_seed);

        Ok(Self {
            prompt: prompt.to_string(),
            width,
            height,
            seed,
            model,
        })
    }

    /// One request per known model, all sharing prompt, size and seed
    pub fn for_all_models(prompt: &str, size: ImageSize, seed: Option<u32>) -> Result<Vec<Self>, ImageError> {
        let first = Self::new(prompt, size, seed, IMAGE_MODELS[0])?;
        Ok(IMAGE_MODELS
            .iter()
            .map(|model| ImageRequest {
                model: *model,
                ..first.clone()
            })
            .collect())
    }

    /// `{base}/prompt/{encodedPrompt}?width&height&seed&model&nologo=true`
    pub fn url(&self, base_url: &str) -> Result<reqwest::Url, ImageError> {
        let base = normalize_base_url(base_url);
        let mut url = reqwest::Url::parse(&base).map_err(|e| ImageError::InvalidUrl(format!("{}: {}", base, e)))?;

        url.path_segments_mut()
            .map_err(|_| ImageError::InvalidUrl(base.clone()))?
            .pop_if_empty()
            .push("prompt")
            .push(&self.prompt);

        url.query_pairs_mut()
            .append_pair("width", &self.width.to_string())
            .append_pair("height", &self.height.to_string())
            .append_pair("seed", &self.seed.to_string())
            .append_pair("model", self.model.id)
            .append_pair("nologo", "true");

        Ok(url)
    }

    /// Suggested download file name
    pub fn file_name(&self) -> String {
        format!("generated-{}-{}x{}-seed{}.png", self.model.name, self.width, self.height, self.seed)
    }
}

/// Random seed in `1..=MAX_SEED`
pub fn random_seed() -> u32 {
    rand::thread_rng().gen_range(1..=MAX_SEED)
}

/// Pick one of the built-in prompt templates
pub fn random_prompt() -> &'static str {
    let index = rand::thread_rng().gen_range(0..PROMPT_TEMPLATES.len());
    PROMPT_TEMPLATES[index]
}

/// Resolve an image model by id
pub fn find_model(id: &str) -> Result<ImageModel, ImageError> {
    ImageModel::find(id).ok_or_else(|| ImageError::UnknownModel(id.to_string()))
}

/// Client for the image API
#[derive(Debug, Clone)]
pub struct ImageClient {
    base_url: String,
    client: reqwest::Client,
}

impl ImageClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            base_url: normalize_base_url(&config.image_api_url),
            client: reqwest::Client::new(),
        }
    }

    /// URL that serves the generated image; usable directly as a display source
    pub fn url_for(&self, request: &ImageRequest) -> Result<reqwest::Url, ImageError> {
        request.url(&self.base_url)
    }

    /// Download the generated image
    pub async fn fetch(&self, request: &ImageRequest) -> Result<Vec<u8>, ImageError> {
        let url = self.url_for(request)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(ApiError::from)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { status: status.as_u16(), body }.into());
        }

        let bytes = response.bytes().await.map_err(ApiError::from)?;
        Ok(bytes.to_vec())
    }
}
