//! Configuration data structures for the prompt2image gateway.
//!
//! This module defines the schema for the application settings, including
//! server parameters, inbound authentication, upstream OpenAI API specifics
//! and the resilience knobs (cache TTL, retry bound, rate-limit interval).

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// API key wrapper that is wiped from memory on drop and never printed.
#[derive(Clone, Default, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the secret. Callers must not log the returned value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("SecretString(<unset>)")
        } else {
            f.write_str("SecretString([REDACTED])")
        }
    }
}

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, workers).
    #[serde(default)]
    pub server: ServerConfig,

    /// Inbound bearer authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Upstream OpenAI Images API settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Resilience settings for outbound generation calls.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Performance and resource management settings.
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads for the Axum server.
    /// Default: Number of logical CPU cores.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Settings for inbound request authentication.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Bearer token clients must present on `/v1/*` routes.
    /// When unset, inbound authentication is disabled (development mode).
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

/// Settings for the upstream OpenAI Images API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Base URL for the OpenAI API.
    /// Default: `https://api.openai.com/v1`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// API key for the upstream service. Also read from `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: SecretString,

    /// Connection and request timeout in seconds.
    /// Default: `60`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for the resilient generation wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// The default image model to use if none is specified by the client.
    /// Default: `dall-e-3`
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default image size. Default: `1024x1024`
    #[serde(default = "default_size")]
    pub default_size: String,

    /// Default rendering quality. Default: `standard`
    #[serde(default = "default_quality")]
    pub default_quality: String,

    /// Default rendering style. Default: `vivid`
    #[serde(default = "default_style")]
    pub default_style: String,

    /// Maximum number of outbound attempts per request.
    /// Default: `3`
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Minimum interval between successive outbound calls, in milliseconds.
    /// Default: `1000`
    #[serde(default = "default_min_call_interval_ms")]
    pub min_call_interval_ms: u64,

    /// Result cache settings.
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Settings for the in-memory result cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Whether the result cache is enabled by default.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Time-to-live of a cached result, in seconds.
    /// Default: `3600`
    #[serde(default = "default_cache_ttl")]
    pub ttl_seconds: u64,

    /// Maximum number of live cache entries. Least-recently-used entries
    /// are evicted once the bound is reached.
    /// Default: `256`
    #[serde(default = "default_max_cache_entries")]
    pub max_entries: usize,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask API keys in logs.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_tokens: bool,
}

/// Settings for tuning application performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum number of idle connections to keep in the HTTP pool.
    /// Default: `10`
    #[serde(default = "default_pool_size")]
    pub connection_pool_size: usize,

    /// Whether to enable GZIP compression for HTTP responses.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enable_compression: bool,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: SecretString::default(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            default_size: default_size(),
            default_quality: default_quality(),
            default_style: default_style(),
            max_retries: default_max_retries(),
            min_call_interval_ms: default_min_call_interval_ms(),
            cache: CacheSettings::default(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: default_cache_ttl(),
            max_entries: default_max_cache_entries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_tokens: true,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            connection_pool_size: default_pool_size(),
            enable_compression: true,
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_true() -> bool {
    true
}

fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "dall-e-3".to_string()
}

fn default_size() -> String {
    "1024x1024".to_string()
}

fn default_quality() -> String {
    "standard".to_string()
}

fn default_style() -> String {
    "vivid".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_min_call_interval_ms() -> u64 {
    1000
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_max_cache_entries() -> usize {
    256
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_pool_size() -> usize {
    10
}
