// Configuration module

mod models;

pub use models::*;

use crate::error::{ApiError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    ///
    /// The upstream API key may also be supplied via `OPENAI_API_KEY`.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::build_from(&Self::default_config_path())?;
        cfg.apply_env_credential();
        Ok(cfg)
    }

    /// Load configuration from an explicit file path (used by tests).
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut cfg = Self::build_from(&path.as_ref().to_string_lossy())?;
        cfg.apply_env_credential();
        Ok(cfg)
    }

    fn build_from(path: &str) -> Result<Self> {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            // Load from config file if it exists
            .add_source(File::with_name(path).required(false))
            // Override with environment variables (prefix: PROMPT2IMAGE_)
            .add_source(Environment::with_prefix("PROMPT2IMAGE").separator("_"))
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ApiError::Config(e.to_string()))
    }

    /// The conventional `OPENAI_API_KEY` variable wins over the config file.
    fn apply_env_credential(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.is_empty() {
                self.openai.api_key = SecretString::new(key);
            }
        }
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".prompt2image")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.max_retries, 3);
        assert_eq!(config.generation.cache.ttl_seconds, 3600);
        assert!(config.generation.cache.enabled);
        assert_eq!(config.openai.timeout_seconds, 60);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[generation]
max_retries = 5
min_call_interval_ms = 250

[generation.cache]
ttl_seconds = 120
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.generation.max_retries, 5);
        assert_eq!(config.generation.min_call_interval_ms, 250);
        assert_eq!(config.generation.cache.ttl_seconds, 120);
        // Untouched sections keep their defaults
        assert_eq!(config.generation.default_model, "dall-e-3");
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = SecretString::new("sk-proj-supersecret");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("REDACTED"));
    }
}
