//! Wire types for the OpenAI Images API.

use crate::generation::models::{GeneratedBatch, GeneratedImage};
use serde::{Deserialize, Serialize};

/// Body for `POST /v1/images/generations`.
#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: String,
    /// `dall-e-3` only; omitted for older models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// `dall-e-3` only; omitted for older models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

/// Successful response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesResponse {
    pub created: i64,
    pub data: Vec<ImageData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageData {
    pub url: Option<String>,
    pub b64_json: Option<String>,
    pub revised_prompt: Option<String>,
}

impl From<ImagesResponse> for GeneratedBatch {
    fn from(response: ImagesResponse) -> Self {
        GeneratedBatch {
            created: response.created,
            images: response
                .data
                .into_iter()
                .map(|image| GeneratedImage {
                    url: image.url,
                    b64_json: image.b64_json,
                    revised_prompt: image.revised_prompt,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "created": 1700000000,
            "data": [
                {"url": "https://example.com/img.png", "revised_prompt": "a red fox in snow"}
            ]
        }"#;

        let response: ImagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.created, 1700000000);
        assert_eq!(response.data.len(), 1);

        let batch = GeneratedBatch::from(response);
        assert_eq!(
            batch.images[0].url.as_deref(),
            Some("https://example.com/img.png")
        );
        assert!(batch.images[0].b64_json.is_none());
    }

    #[test]
    fn test_request_omits_unset_fields() {
        let request = ImageGenerationRequest {
            model: "dall-e-2".to_string(),
            prompt: "a red fox".to_string(),
            n: 1,
            size: "512x512".to_string(),
            quality: None,
            style: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("quality").is_none());
        assert!(json.get("style").is_none());
        assert_eq!(json["n"], 1);
    }
}
