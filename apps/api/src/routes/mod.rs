pub mod health;

use axum::{
    extract::{DefaultBodyLimit, State},
    response::Html,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;
use crate::templates;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(templates::index::render(state.config.max_input_chars))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze))
        .route("/api/v1/analyze/upload", post(handlers::handle_analyze_upload))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
