use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::add_item))
        .route("/check", post(handlers::check_item))
        .route("/delete", post(handlers::delete_item))
        .route("/favicon.ico", get(handlers::favicon))
        .route("/:list_name", get(handlers::show_list))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
