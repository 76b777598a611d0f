// HTTP routes configuration

use super::handlers::{
    cache_clear_handler, cache_stats_handler, generate_handler, health_handler, metrics_handler,
};
use super::middleware::{request_id_layers, require_bearer_auth};
use crate::config::AppConfig;
use crate::error::Result;
use crate::generation::GenerationService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub generation: Arc<GenerationService>,
}

pub fn create_router(config: AppConfig, generation: Arc<GenerationService>) -> Result<Router> {
    let enable_compression = config.performance.enable_compression;
    let state = AppState { config, generation };

    let (set_request_id, propagate_request_id) = request_id_layers();

    // Bearer auth applies to the API surface, not to health/metrics probes
    let api_routes = Router::new()
        .route("/v1/images/generations", post(generate_handler))
        .route("/v1/images/cache/stats", get(cache_stats_handler))
        .route("/v1/images/cache/clear", post(cache_clear_handler))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_bearer_auth,
        ));

    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .merge(api_routes)
        // Prompts are plain text; anything larger than this is a mistake
        .layer(tower_http::limit::RequestBodyLimitLayer::new(256 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id);

    if enable_compression {
        app = app.layer(CompressionLayer::new());
    }

    Ok(app.with_state(state))
}
