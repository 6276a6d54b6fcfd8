mod analyze;
mod browse;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze::analyze))
        .route("/api/history", get(browse::history))
        .route("/api/submissions/:submission_id", get(browse::submission_detail))
        .route("/api/progress", get(browse::progress))
        .route("/api/profile", get(browse::profile))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
