//! Content-digest endpoint.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;

use crate::error::ApiError;
use crate::messages::HashResponse;
use crate::state::AppState;

/// Streaming content digest of a stored FASTA.
pub async fn hash_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<HashResponse>, ApiError> {
    let digest = state.artifacts.digest(&filename)?;
    Ok(Json(HashResponse { filename, digest }))
}
