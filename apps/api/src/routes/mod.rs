pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::prepitch::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/prepitch", post(handlers::handle_generate))
        .route(
            "/api/prepitch/progress/:session_id",
            get(handlers::handle_progress),
        )
        .with_state(state)
}
