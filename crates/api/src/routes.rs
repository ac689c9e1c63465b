use crate::handlers;
use crate::middleware::require_admin_key;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

pub fn create_api_routes(state: AppState) -> Router {
    let admin = Router::new()
        .merge(handlers::cache::routes())
        .merge(handlers::query_pool::routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_key,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(handlers::server_status::routes())
        .nest("/admin", admin)
        .with_state(state)
}
