//! Request and result models for the generation pipeline.

use crate::config::GenerationConfig;
use serde::{Deserialize, Serialize};

/// Inbound payload for `POST /v1/images/generations`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageRequest {
    /// Free-text prompt describing the image.
    pub prompt: String,
    /// Image model to use. Defaults to the configured model.
    pub model: Option<String>,
    /// Image dimensions, e.g. `1024x1024`.
    pub size: Option<String>,
    /// Rendering quality (`standard` or `hd`).
    pub quality: Option<String>,
    /// Rendering style (`vivid` or `natural`).
    pub style: Option<String>,
    /// Whether to consult and populate the result cache.
    pub use_cache: Option<bool>,
    /// Upper bound on outbound attempts for this request.
    pub max_retries: Option<u32>,
}

/// Fully-resolved options for one generation call.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub model: String,
    pub size: String,
    pub quality: String,
    pub style: String,
    pub use_cache: bool,
    pub max_retries: u32,
}

impl GenerationOptions {
    /// Resolve per-request overrides against the configured defaults.
    pub fn resolve(request: &GenerateImageRequest, defaults: &GenerationConfig) -> Self {
        Self {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| defaults.default_model.clone()),
            size: request
                .size
                .clone()
                .unwrap_or_else(|| defaults.default_size.clone()),
            quality: request
                .quality
                .clone()
                .unwrap_or_else(|| defaults.default_quality.clone()),
            style: request
                .style
                .clone()
                .unwrap_or_else(|| defaults.default_style.clone()),
            use_cache: request.use_cache.unwrap_or(defaults.cache.enabled),
            max_retries: request.max_retries.unwrap_or(defaults.max_retries),
        }
    }

    /// Options built purely from configured defaults.
    pub fn defaults(config: &GenerationConfig) -> Self {
        Self {
            model: config.default_model.clone(),
            size: config.default_size.clone(),
            quality: config.default_quality.clone(),
            style: config.default_style.clone(),
            use_cache: config.cache.enabled,
            max_retries: config.max_retries,
        }
    }
}

/// One generated image as returned by the upstream service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

/// The upstream result for one generation call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedBatch {
    /// Unix timestamp reported by the upstream service.
    pub created: i64,
    pub images: Vec<GeneratedImage>,
}

/// Result of [`GenerationService::execute`](crate::generation::GenerationService::execute).
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub batch: GeneratedBatch,
    /// True when the result came from the cache without an outbound call.
    pub served_from_cache: bool,
    /// Number of outbound attempts made (0 on a cache hit).
    pub attempts_used: u32,
}
