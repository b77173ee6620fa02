use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use super::{handlers, session::ensure_session, state::AppState};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::healthcheck))
        .route("/lists", get(handlers::list_lists).post(handlers::create_list))
        .route(
            "/lists/:list_id",
            get(handlers::show_list)
                .patch(handlers::rename_list)
                .delete(handlers::delete_list),
        )
        .route("/lists/:list_id/complete_all", post(handlers::complete_all))
        .route("/lists/:list_id/items", post(handlers::create_item))
        .route("/lists/:list_id/items/:item_id", delete(handlers::delete_item))
        .route("/lists/:list_id/items/:item_id/toggle", post(handlers::toggle_item))
        .layer(middleware::from_fn_with_state(state.clone(), ensure_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
