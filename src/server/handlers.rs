// HTTP request handlers

use super::routes::AppState;
use crate::error::ApiError;
use crate::generation::models::{GenerateImageRequest, GeneratedImage, GenerationOptions};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check upstream credential
    let credential_check = if state.config.openai.api_key.is_empty() {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck {
            status: "error".to_string(),
            message: "Upstream API key is not configured".to_string(),
        }
    } else {
        HealthCheck {
            status: "ok".to_string(),
            message: "Upstream API key present".to_string(),
        }
    };
    checks.insert("upstream_credential".to_string(), credential_check);

    // Check result cache
    let stats = state.generation.cache_stats();
    let cache_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "{} entries, {} hits, {} misses",
            stats.entries, stats.hits, stats.misses
        ),
    };
    checks.insert("result_cache".to_string(), cache_check);

    // Check configuration
    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!("API base: {}", state.config.openai.api_base_url),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Response for `POST /v1/images/generations`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    pub id: String,
    pub created: i64,
    pub model: String,
    pub data: Vec<GeneratedImage>,
    pub served_from_cache: bool,
    pub attempts_used: u32,
}

/// Handler for the image generation endpoint.
pub async fn generate_handler(
    State(state): State<AppState>,
    body: String, // Get raw JSON as string first
) -> Result<Response, ApiError> {
    use tracing::{debug, info};

    let started = std::time::Instant::now();

    // Manually deserialize to get better error messages
    let request: GenerateImageRequest = serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Failed to deserialize request: {}", e);
        ApiError::InvalidInput(format!("JSON deserialization error: {}", e))
    })?;

    let options = GenerationOptions::resolve(&request, state.generation.config());
    info!(
        model = %options.model,
        size = %options.size,
        use_cache = options.use_cache,
        "Received image generation request"
    );

    let result = state.generation.execute(&request.prompt, &options).await;

    let status_code = match &result {
        Ok(_) => 200,
        Err(e) => e.status_code().as_u16(),
    };
    crate::metrics::record_request(
        "POST",
        "/v1/images/generations",
        status_code,
        started.elapsed().as_secs_f64(),
    );

    let outcome = result?;
    debug!(
        served_from_cache = outcome.served_from_cache,
        attempts_used = outcome.attempts_used,
        "Generation complete"
    );

    let response = GenerateImageResponse {
        id: format!("img_{}", uuid::Uuid::new_v4().simple()),
        created: outcome.batch.created,
        model: options.model,
        data: outcome.batch.images,
        served_from_cache: outcome.served_from_cache,
        attempts_used: outcome.attempts_used,
    };

    Ok(Json(response).into_response())
}

/// Response for `GET /v1/images/cache/stats`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub entries: usize,
}

pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.generation.cache_stats();
    Json(CacheStatsResponse {
        hits: stats.hits,
        misses: stats.misses,
        inserts: stats.inserts,
        entries: stats.entries,
    })
}

/// Response for `POST /v1/images/cache/clear`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheClearResponse {
    pub cleared: bool,
}

pub async fn cache_clear_handler(State(state): State<AppState>) -> Json<CacheClearResponse> {
    state.generation.clear_cache();
    tracing::info!("Result cache cleared by operator request");
    Json(CacheClearResponse { cleared: true })
}

/// Handler for the Prometheus metrics endpoint.
pub async fn metrics_handler() -> Response {
    let body = crate::metrics::gather_metrics();
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}
