//! Ledger listing, manual append, and on-demand audit endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;

use crate::error::ApiError;
use crate::messages::{LedgerAddRequest, LedgerResponse, VerifyResponse};
use crate::state::AppState;

/// The full chain in index order.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LedgerResponse>, ApiError> {
    let ledger = state.query.list_all()?;
    Ok(Json(LedgerResponse { ledger }))
}

/// Append a manual entry for a subject, with an optional pre-computed
/// digest. Without a digest, the subject must name a stored artifact.
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LedgerAddRequest>,
) -> Result<Json<LedgerResponse>, ApiError> {
    state.recorder.record(&req.subject, req.digest)?;
    let ledger = state.query.list_all()?;
    Ok(Json(LedgerResponse { ledger }))
}

/// Walk the chain and report integrity violations.
pub async fn verify(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let report = state.query.verify()?;
    Ok(Json(report.into()))
}
