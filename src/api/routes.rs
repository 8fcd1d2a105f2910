use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/health", get(handlers::health_check))
        .route("/learn", post(handlers::learn))
        .route("/generate-quiz", post(handlers::generate_quiz))
        .route("/submit-answer", post(handlers::submit_answer))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
