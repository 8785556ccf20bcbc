pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::publish::handlers as publish_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/posts/generate", post(handlers::handle_generate))
        .route("/api/v1/posts/:id", get(handlers::handle_get_draft))
        .route("/api/v1/posts/:id/score", post(handlers::handle_score_draft))
        .route(
            "/api/v1/posts/:id/regenerate-block",
            post(handlers::handle_regenerate_block),
        )
        .route(
            "/api/v1/posts/:id/publish",
            post(publish_handlers::handle_publish),
        )
        .with_state(state)
}
