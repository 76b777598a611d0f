// Outbound port for image generation

use crate::error::Result;
use crate::generation::models::{GeneratedBatch, GenerationOptions};
use async_trait::async_trait;

/// The outbound call the wrapper protects.
///
/// Production uses [`crate::openai::OpenAiClient`]; tests substitute a fake
/// that returns canned success/failure sequences without touching the
/// network.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Whether the backend has the credential it needs to make calls.
    fn is_configured(&self) -> bool;

    /// Perform one generation attempt.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<GeneratedBatch>;
}
