// Resilient generation wrapper: cache, rate gate and bounded retry

use crate::cache::{fingerprint, CacheConfig, CacheStats, TtlCache};
use crate::config::GenerationConfig;
use crate::error::{ApiError, Result};
use crate::generation::backend::ImageBackend;
use crate::generation::backoff::{retry_schedule, MAX_BACKOFF};
use crate::generation::catalog;
use crate::generation::models::{GeneratedBatch, GenerationOptions, GenerationOutcome};
use crate::generation::rate_gate::RateGate;
use crate::metrics;
use crate::utils::clock::Clock;
use backoff::backoff::Backoff;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Wraps the outbound image-generation call with a TTL result cache, a
/// minimum-interval rate gate and a bounded retry loop with exponential
/// backoff.
///
/// Each instance owns its cache and gate; constructing a fresh instance
/// per test gives full isolation.
pub struct GenerationService {
    config: GenerationConfig,
    backend: Arc<dyn ImageBackend>,
    cache: TtlCache<GeneratedBatch>,
    gate: RateGate,
    clock: Arc<dyn Clock>,
}

impl GenerationService {
    pub fn new(
        config: GenerationConfig,
        backend: Arc<dyn ImageBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = TtlCache::new(CacheConfig::from(&config.cache), clock.clone());
        let gate = RateGate::new(Duration::from_millis(config.min_call_interval_ms));
        Self {
            config,
            backend,
            cache,
            gate,
            clock,
        }
    }

    /// Configured defaults used to resolve per-request options.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate an image for `prompt`, consulting the cache first.
    ///
    /// Failure semantics: an empty prompt or unsupported option fails with
    /// `InvalidInput` before any outbound or cache activity; a missing
    /// upstream credential fails with `Config` and is never retried;
    /// transient upstream failures are retried up to `max_retries` with
    /// delays of exactly 2^attempt seconds. A failed call never populates
    /// the cache.
    pub async fn execute(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GenerationOutcome> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ApiError::InvalidInput("prompt must not be empty".to_string()));
        }
        catalog::validate(options)?;

        if !self.backend.is_configured() {
            return Err(ApiError::Config(
                "upstream API key is not configured (set OPENAI_API_KEY)".to_string(),
            ));
        }

        let key = fingerprint(
            &options.model,
            &options.size,
            &options.quality,
            &options.style,
            prompt,
        );

        if options.use_cache {
            if let Some(batch) = self.cache.get(&key) {
                metrics::record_cache_hit();
                return Ok(GenerationOutcome {
                    batch,
                    served_from_cache: true,
                    attempts_used: 0,
                });
            }
            metrics::record_cache_miss();
        }

        let max_retries = options.max_retries.max(1);
        let mut schedule = retry_schedule();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            self.gate.admit(self.clock.as_ref()).await;

            let started = self.clock.now();
            match self.backend.generate(prompt, options).await {
                Ok(batch) => {
                    let elapsed = self.clock.now().duration_since(started);
                    metrics::record_upstream_call(&options.model, "success", elapsed.as_secs_f64());
                    if attempt > 1 {
                        debug!(attempt, "generation succeeded after retries");
                    }
                    if options.use_cache {
                        self.cache.insert(key, batch.clone());
                        metrics::record_cache_insert();
                        metrics::update_cache_entries(self.cache.len());
                    }
                    return Ok(GenerationOutcome {
                        batch,
                        served_from_cache: false,
                        attempts_used: attempt,
                    });
                }
                Err(err) => {
                    let elapsed = self.clock.now().duration_since(started);
                    metrics::record_upstream_call(&options.model, "failure", elapsed.as_secs_f64());

                    if attempt >= max_retries {
                        return Err(ApiError::ExhaustedRetries {
                            attempts: attempt,
                            source: Box::new(err),
                        });
                    }

                    let delay = schedule.next_backoff().unwrap_or(MAX_BACKOFF);
                    warn!(
                        attempt,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "generation attempt failed, backing off"
                    );
                    metrics::record_upstream_retry(&options.model);
                    self.clock.sleep(delay).await;
                }
            }
        }
    }

    /// Current cache counters and live entry count.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached result.
    pub fn clear_cache(&self) {
        self.cache.clear();
        metrics::update_cache_entries(0);
    }
}
