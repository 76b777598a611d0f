//! The resilient generation core.
//!
//! [`GenerationService`] wraps the outbound image-generation call with a
//! TTL result cache, a process-wide minimum-interval rate gate and a
//! bounded retry loop with unjittered exponential backoff.
//!
//! # Components
//!
//! - `service`: the wrapper itself (cache lookup → gated retry loop).
//! - `backend`: the outbound port, implemented by the OpenAI client and by
//!   test fakes.
//! - `rate_gate`: minimum-delay gate shared by all callers.
//! - `backoff`: the 2^attempt-seconds retry schedule.
//! - `catalog`: supported model/size/quality/style tables.
//! - `models`: request, options and outcome types.

pub mod backend;
pub mod backoff;
pub mod catalog;
pub mod models;
pub mod rate_gate;
pub mod service;

pub use backend::ImageBackend;
pub use models::{
    GenerateImageRequest, GeneratedBatch, GeneratedImage, GenerationOptions, GenerationOutcome,
};
pub use rate_gate::RateGate;
pub use service::GenerationService;
