// OpenAI Images API integration

pub mod client;
pub mod models;

pub use client::OpenAiClient;
pub use models::{ImageData, ImageGenerationRequest, ImagesResponse};
