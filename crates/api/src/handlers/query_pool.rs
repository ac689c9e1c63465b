use axum::{extract::State, routing::get, Json, Router};
use serverwatch_application::ports::QueryPoolStatus;
use tracing::{debug, instrument};

use crate::{dto::AdminEnvelope, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/query-pool", get(get_query_pool_status))
}

#[instrument(skip(state), name = "api_get_query_pool_status")]
async fn get_query_pool_status(
    State(state): State<AppState>,
) -> Json<AdminEnvelope<QueryPoolStatus>> {
    let status = state.query_pool.status();

    debug!(
        running = status.running_queries,
        queued = status.queued_queries,
        active = status.active_queries,
        "Query pool status retrieved"
    );

    Json(AdminEnvelope::ok(status))
}
