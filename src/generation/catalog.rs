// Supported model/size/quality/style tables

use crate::error::{ApiError, Result};
use crate::generation::models::GenerationOptions;

/// Sizes accepted per model.
static MODEL_SIZES: phf::Map<&'static str, &'static [&'static str]> = phf::phf_map! {
    "dall-e-2" => &["256x256", "512x512", "1024x1024"],
    "dall-e-3" => &["1024x1024", "1792x1024", "1024x1792"],
};

static QUALITIES: phf::Set<&'static str> = phf::phf_set! {
    "standard", "hd",
};

static STYLES: phf::Set<&'static str> = phf::phf_set! {
    "vivid", "natural",
};

/// Validate resolved options against the supported tables.
pub fn validate(options: &GenerationOptions) -> Result<()> {
    let sizes = MODEL_SIZES.get(options.model.as_str()).ok_or_else(|| {
        ApiError::InvalidInput(format!(
            "Unsupported model: {}. Supported models: {}",
            options.model,
            supported_models().join(", ")
        ))
    })?;

    if !sizes.contains(&options.size.as_str()) {
        return Err(ApiError::InvalidInput(format!(
            "Unsupported size {} for model {}. Supported sizes: {}",
            options.size,
            options.model,
            sizes.join(", ")
        )));
    }

    if !QUALITIES.contains(options.quality.as_str()) {
        return Err(ApiError::InvalidInput(format!(
            "Unsupported quality: {}. Supported: standard, hd",
            options.quality
        )));
    }

    if !STYLES.contains(options.style.as_str()) {
        return Err(ApiError::InvalidInput(format!(
            "Unsupported style: {}. Supported: vivid, natural",
            options.style
        )));
    }

    Ok(())
}

pub fn supported_models() -> Vec<&'static str> {
    let mut models: Vec<&'static str> = MODEL_SIZES.keys().copied().collect();
    models.sort_unstable();
    models
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(model: &str, size: &str, quality: &str, style: &str) -> GenerationOptions {
        GenerationOptions {
            model: model.to_string(),
            size: size.to_string(),
            quality: quality.to_string(),
            style: style.to_string(),
            use_cache: true,
            max_retries: 3,
        }
    }

    #[test]
    fn test_valid_options() {
        assert!(validate(&options("dall-e-3", "1024x1024", "standard", "vivid")).is_ok());
        assert!(validate(&options("dall-e-2", "512x512", "hd", "natural")).is_ok());
    }

    #[test]
    fn test_unknown_model_rejected() {
        let err = validate(&options("imagen-4", "1024x1024", "standard", "vivid")).unwrap_err();
        assert!(err.to_string().contains("Unsupported model"));
    }

    #[test]
    fn test_size_checked_per_model() {
        // 1792x1024 exists for dall-e-3 but not dall-e-2
        assert!(validate(&options("dall-e-3", "1792x1024", "standard", "vivid")).is_ok());
        assert!(validate(&options("dall-e-2", "1792x1024", "standard", "vivid")).is_err());
    }

    #[test]
    fn test_bad_quality_and_style_rejected() {
        assert!(validate(&options("dall-e-3", "1024x1024", "ultra", "vivid")).is_err());
        assert!(validate(&options("dall-e-3", "1024x1024", "standard", "anime")).is_err());
    }
}
