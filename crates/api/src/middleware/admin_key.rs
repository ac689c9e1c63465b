use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

pub const ADMIN_KEY_HEADER: &str = "X-Api-Key";

/// Gate for every admin route, reads included.
pub async fn require_admin_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    match state.admin_key.as_deref() {
        None => next.run(request).await,
        Some(expected) => verify_request(request, next, expected).await,
    }
}

async fn verify_request(
    request: Request,
    next: Next,
    expected: &str,
) -> Response {
    let authorized = extract_admin_key(&request)
        .map(|provided| timing_safe_eq(provided.as_bytes(), expected.as_bytes()))
        .unwrap_or(false);

    if !authorized {
        warn!(path = %request.uri().path(), "Rejected admin request without a valid key");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid or missing admin key" })),
        )
            .into_response();
    }
    next.run(request).await
}

fn extract_admin_key(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
}

pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
