use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the axum router with all Bio-Pipeline endpoints.
pub fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/", get(handlers::health))
        .route("/upload-fasta", post(handlers::analysis::upload_fasta))
        .route("/analyze/:filename", get(handlers::analysis::analyze))
        .route("/fasta-sources", get(handlers::analysis::fasta_sources))
        .route("/fetch-fasta", post(handlers::analysis::fetch_fasta))
        .route("/analysis-history", get(handlers::analysis::history))
        .route(
            "/analysis-history/:filename",
            get(handlers::analysis::history_for),
        )
        .route("/hash/:filename", post(handlers::hashing::hash_file))
        .route("/ledger", get(handlers::ledger::list))
        .route("/ledger/add", post(handlers::ledger::add))
        .route("/ledger/verify", get(handlers::ledger::verify))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
