use axum::{extract::State, routing::get, Json, Router};
use serverwatch_application::ports::CacheStats;
use serverwatch_application::use_cases::CacheAction;
use tracing::{debug, info, instrument};

use crate::{
    dto::{AdminEnvelope, CacheActionRequest, CacheActionResponse},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/cache", get(get_cache_stats).post(manage_cache))
}

#[instrument(skip(state), name = "api_get_cache_stats")]
async fn get_cache_stats(State(state): State<AppState>) -> Json<AdminEnvelope<CacheStats>> {
    let stats = state.cache_stats.execute();

    debug!(
        total_entries = stats.total_entries,
        total_size_bytes = stats.total_size_bytes,
        "Cache statistics retrieved"
    );

    Json(AdminEnvelope::ok(stats))
}

#[instrument(skip(state), name = "api_manage_cache")]
async fn manage_cache(
    State(state): State<AppState>,
    Json(req): Json<CacheActionRequest>,
) -> Result<Json<CacheActionResponse>, ApiError> {
    let action = CacheAction::from_parts(&req.action, req.key, req.pattern, req.data_type)?;
    let outcome = state.manage_cache.execute(action)?;

    info!(action = %req.action, "Cache action completed");

    Ok(Json(CacheActionResponse::from(outcome)))
}
