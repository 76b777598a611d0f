// Cache management module

pub mod key;
pub mod models;
pub mod store;

pub use key::{fingerprint, normalize_prompt};
pub use models::{CacheConfig, CacheStats};
pub use store::TtlCache;
