use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    dto::{ServerStatusBatchResponse, ServerStatusEntry, ServerStatusQuery, ServerStatusResponse},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/server-status", get(get_server_status))
}

/// Single server when `serverId` is given, every registered server otherwise.
#[instrument(skip(state), name = "api_get_server_status")]
async fn get_server_status(
    State(state): State<AppState>,
    Query(params): Query<ServerStatusQuery>,
) -> Result<Response, ApiError> {
    let force_refresh = params.force_refresh();

    match params.server_id() {
        Some(server_id) => {
            let view = state.server_status.get_one(server_id, force_refresh).await?;
            debug!(
                server_id,
                status = view.server.status.as_str(),
                source = view.cache.source.as_str(),
                "Server status served"
            );
            Ok(Json(ServerStatusResponse::from(view)).into_response())
        }
        None => {
            let servers: Vec<ServerStatusEntry> = state
                .server_status
                .get_all(force_refresh)
                .await
                .into_iter()
                .map(ServerStatusEntry::from)
                .collect();
            debug!(count = servers.len(), force_refresh, "Server statuses served");
            Ok(Json(ServerStatusBatchResponse { servers }).into_response())
        }
    }
}
