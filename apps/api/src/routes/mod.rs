pub mod analyze;
pub mod health;
pub mod index;
pub mod reports;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Room for multipart boundaries and the non-file fields on top of the file itself.
const MULTIPART_ENVELOPE_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_ENVELOPE_BYTES;

    Router::new()
        .route("/", get(index::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs", get(analyze::list_jobs))
        .route("/api/v1/analyze", post(analyze::analyze_upload))
        .route("/api/v1/analyze/text", post(analyze::analyze_text))
        .route(
            "/api/v1/reports/:id/download",
            get(reports::download_report),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
