// HTTP middleware

use super::routes::AppState;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::error::ApiError;

/// Create request ID layers for the application
pub fn request_id_layers() -> (SetRequestIdLayer<MakeRequestUuid>, PropagateRequestIdLayer) {
    (
        SetRequestIdLayer::x_request_id(MakeRequestUuid),
        PropagateRequestIdLayer::x_request_id(),
    )
}

/// Bearer-token gate for the `/v1` routes.
///
/// When no inbound key is configured, authentication is disabled and every
/// request passes (development mode).
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.auth.api_key.as_ref() else {
        return Ok(next.run(request).await);
    };

    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(token) if token == expected.expose() => Ok(next.run(request).await),
        Some(_) => Err(ApiError::Unauthorized("invalid API key".to_string())),
        None => Err(ApiError::Unauthorized(
            "missing bearer token in Authorization header".to_string(),
        )),
    }
}
